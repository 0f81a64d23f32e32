use crate::config::ConfigStore;
use crate::core::{resolve, Sink, Source};
use crate::extractors::{youtube, YouTubeSource};
use crate::sinks::{spotify, SpotifySink};
use crate::utils::{failed, format_output, prompt, successful};
use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "tunelink")]
#[command(about = "Converts YouTube or YouTube Music links into Spotify links")]
#[command(version)]
pub struct Cli {
    /// A YouTube link (for example https://music.youtube.com/watch?v=oHg5SJYRHA0)
    #[arg(value_name = "LINK")]
    pub link: Option<String>,

    /// Raw output (no formatting) - useful for piping
    #[arg(long)]
    pub raw: bool,

    /// Re-run the interactive credential setup
    #[arg(long)]
    pub reconfigure: bool,
}

impl Cli {
    pub async fn run(&self) -> Result<()> {
        let mut youtube_store = ConfigStore::open("youtube")?;
        let mut spotify_store = ConfigStore::open("spotify")?;

        if self.reconfigure {
            configure_youtube(&mut youtube_store)?;
            configure_spotify(&mut spotify_store)?;
        }

        let mut source = YouTubeSource::new(&youtube_store);
        if !source.is_configured() {
            configure_youtube(&mut youtube_store)?;
            source = YouTubeSource::new(&youtube_store);
        }

        let mut sink = SpotifySink::new(spotify_store.clone());
        if !sink.is_configured() {
            configure_spotify(&mut spotify_store)?;
            sink = SpotifySink::new(spotify_store);
        }

        let Some(link) = self.link.as_deref() else {
            // Nothing to resolve; useful when only reconfiguring.
            return Ok(());
        };

        match resolve(&source, &sink, link).await {
            Ok(found) => print!("{}", format_output(&found, self.raw)),
            Err(e) => print!("{}", failed(&e.to_string())),
        }

        Ok(())
    }
}

fn configure_youtube(store: &mut ConfigStore) -> Result<()> {
    println!(
        "You will need a Google account in order to get an API key for YouTube Data. \
         See https://developers.google.com/youtube/registering_an_application for more info"
    );
    let api_key = prompt("Enter your YouTube Data API key")?;
    store.set(youtube::API_KEY, &api_key)?;
    print!("{}", successful("API key set!"));
    Ok(())
}

fn configure_spotify(store: &mut ConfigStore) -> Result<()> {
    println!(
        "You will need a (free or paid) Spotify account in order to get API access to Spotify. \
         Visit https://developer.spotify.com/documentation/general/guides/app-settings/ \
         to find out how to generate these credentials"
    );
    let client_id = prompt("Enter your Spotify client ID")?;
    let client_secret = prompt("Enter your Spotify client secret")?;
    store.set(spotify::CLIENT_ID, &client_id)?;
    store.set(spotify::CLIENT_SECRET, &client_secret)?;
    print!("{}", successful("Credentials set!"));
    Ok(())
}

//! Run with: cargo run -p kinodex-api --example resolve -- "Some.Title.2011.720p.x264-GROUP"
//!
//! Resolves a release name to its catalog title id. Pass --tv to list
//! the seasons and episodes the name refers to, --game to look for a
//! video game instead of a film or show.

use kinodex_api::imdb::ImdbClient;
use kinodex_core::config::AppConfig;
use kinodex_core::lookup::Lookup;
use kinodex_core::query::{Episodes, TitleQuery};
use kinodex_core::resolver::Resolver;

#[tokio::main]
async fn main() {
    let mut game = false;
    let mut tv = false;
    let mut title = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--game" => game = true,
            "--tv" => tv = true,
            other => title = Some(other.to_owned()),
        }
    }
    let Some(title) = title else {
        eprintln!("usage: resolve [--game] [--tv] <release name>");
        std::process::exit(2);
    };

    let config = AppConfig::load().unwrap_or_else(|err| {
        eprintln!("config load failed ({err}), using defaults");
        AppConfig::default()
    });

    let provider = match ImdbClient::with_config(&config.provider) {
        Ok(client) => client,
        Err(err) => {
            eprintln!("client setup failed: {err}");
            std::process::exit(1);
        }
    };

    let resolver = if config.cache.enabled {
        match config.ensure_db_path().and_then(|path| Lookup::open(&path)) {
            Ok(store) => Resolver::with_lookup(provider, store),
            Err(err) => {
                eprintln!("lookup store unavailable ({err}), continuing without it");
                Resolver::new(provider)
            }
        }
    } else {
        Resolver::new(provider)
    };

    let mut query = TitleQuery::new(title);
    query.mask_enabled = true;
    query.video_game = game;

    if tv {
        let seasons = query.seasons();
        if seasons.is_empty() {
            println!("No season or episode tags found.");
        }
        for (season, episodes) in seasons.iter() {
            match episodes {
                Episodes::Full => println!("Season {season}: full"),
                Episodes::Numbered(list) => {
                    let list: Vec<String> = list.iter().map(|e| e.to_string()).collect();
                    println!("Season {season}: episodes {}", list.join(", "));
                }
            }
        }
    }

    match resolver.resolve(&mut query).await {
        Ok(id) => println!("{id}"),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

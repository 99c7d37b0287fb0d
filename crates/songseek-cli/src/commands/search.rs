use anyhow::Result;
use songseek_client::{Config, SongSearch};
use songseek_core::{EmptyReason, MissingLimitPolicy, SearchOutcome, SongResult};

pub async fn run_search(
    config: &Config,
    query: &str,
    limit: Option<usize>,
    all: bool,
    json: bool,
) -> Result<()> {
    log::info!("Searching for {:?}", query);

    let mut options = config.search_options(limit);
    if all {
        options = options.with_missing_limit(MissingLimitPolicy::ReturnAll);
    }

    let search = SongSearch::from_config(config)?;
    let outcome = search.search(query, &options).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.songs)?);
    } else {
        print!("{}", render(&outcome));
    }

    Ok(())
}

/// Text rendering of an outcome: one line per song, or an explanation.
fn render(outcome: &SearchOutcome) -> String {
    match &outcome.empty_reason {
        Some(EmptyReason::NoMatches) => "No songs found.\n".to_string(),
        Some(EmptyReason::LimitNotSupplied { matched }) => format!(
            "{} songs matched. Pass --limit N or --all to list them\n\
             (or set default_limit / missing_limit in the config).\n",
            matched
        ),
        Some(EmptyReason::RequestFailed(message)) => {
            format!("Search failed: {}\n", message)
        }
        None if outcome.is_empty() => "No songs requested (limit 0).\n".to_string(),
        None => outcome
            .songs
            .iter()
            .enumerate()
            .map(|(i, song)| format!("{:>3}. {}\n", i + 1, song_line(song)))
            .collect(),
    }
}

fn song_line(song: &SongResult) -> String {
    let artists = song
        .artists
        .iter()
        .map(|a| {
            if a.is_verified {
                format!("{} ✓", a.name)
            } else {
                a.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ");

    let title = if song.full_title.is_empty() {
        &song.title
    } else {
        &song.full_title
    };

    let mut line = title.clone();
    if let Some(date) = &song.release_date {
        line.push_str(&format!(" ({})", date));
    }
    if !artists.is_empty() {
        line.push_str(&format!(" [{}]", artists));
    }
    if let Some(url) = &song.lyrics_page_url {
        line.push_str(&format!("\n     {}", url));
    }
    line
}

use log_tailer::LogTailer;
use std::env;
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.len() > 3 {
        eprintln!("Usage: {} <file_path> [search_term]", args[0]);
        process::exit(1);
    }

    let tailer = LogTailer::new(&args[1]);

    match tailer.read_last(10).await {
        Ok(lines) => {
            println!("Last {} lines of {}:", lines.len(), tailer.path().display());
            for line in lines {
                println!("  {}", line);
            }
        }
        Err(e) => {
            eprintln!("Error reading file: {}", e);
            process::exit(1);
        }
    }

    if let Some(term) = args.get(2) {
        match tailer.search(term).await {
            Ok(matches) => {
                println!("{} lines contain '{}':", matches.len(), term);
                for line in matches {
                    println!("  {}", line);
                }
            }
            Err(e) => eprintln!("Error searching file: {}", e),
        }
    }

    let handle = match tailer
        .watch_with(|line| println!("New line: {}", line))
        .await
    {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Error setting up file watcher: {}", e);
            process::exit(1);
        }
    };

    println!("Watching for 30 seconds, press Ctrl+C to stop early...");
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = tokio::time::sleep(Duration::from_secs(30)) => {}
    }

    handle.stop().await;
}

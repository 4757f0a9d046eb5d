reexport!(testing, test);
reexport!(error);
reexport!(config);
reexport!(sql);
reexport!(api);
reexport!(store);
reexport!(results);
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn};

use itertools::Itertools as _;
use std::io::Write as _;
use std::sync::Arc;
use tokio::io::AsyncBufReadExt as _;

#[tokio::main]
async fn main() -> Result {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cfg = config();
    let auth: Arc<dyn TokenProvider> = match cfg.api_token.as_deref() {
        Some(token) => Arc::new(StaticToken::new(token)),
        None => Arc::new(NoAuth),
    };
    let client = ApiClient::new(cfg.api_url.clone(), auth)?;

    let connections = Store::new(ConnectionState::default());
    let session = Store::new(QuerySession::default());
    let history = Store::new(HistoryState::default());

    match client.connections().await {
        Ok(list) => {
            info!(count = list.len(), "loaded connections");
            connections.update(|s| s.set_all(list));
        }
        Err(err) => eprintln!("Could not load connections: {err}"),
    }

    println!("qmind — ask your database anything.");
    println!(
        "Commands: \\c [N] connections, \\new <name> <conn_string>, \\test <conn_string>, \\rm <N>,"
    );
    println!(
        "          \\index, \\history, \\csv [path], \\q quit. Anything else runs as a query."
    );
    print_connections(&connections.get());

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    prompt()?;
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => {}
            "\\q" | "\\quit" => break,
            "\\c" => print_connections(&connections.get()),
            "\\index" => index_selected(&client, &connections).await,
            "\\history" => show_history(&client, &connections, &history).await,
            _ if line.starts_with("\\c ") => select_connection(&connections, &line[3..]),
            _ if line.starts_with("\\csv") => {
                let path = line[4..].trim();
                let path = if path.is_empty() {
                    "querymind_results.csv"
                } else {
                    path
                };
                export_csv(&session, path);
            }
            _ if line.starts_with("\\new ") => create_connection(&client, &connections, &line[5..]).await,
            _ if line.starts_with("\\test ") => test_connection(&client, &line[6..]).await,
            _ if line.starts_with("\\rm ") => remove_connection(&client, &connections, &line[4..]).await,
            _ if line.starts_with('\\') => println!("Unknown command: {line}"),
            question => run_question(&client, &connections, &session, question).await,
        }
        prompt()?;
    }
    Ok(())
}

fn prompt() -> Result {
    print!("qmind> ");
    std::io::stdout().flush()?;
    Ok(())
}

fn print_connections(state: &ConnectionState) {
    if state.connections.is_empty() {
        println!("No connections yet.");
        return;
    }
    for (i, c) in state.connections.iter().enumerate() {
        let marker = if state.selected.as_deref() == Some(c.id.as_str()) {
            "*"
        } else {
            " "
        };
        let indexed = match c.table_count {
            Some(n) => format!("{n} tables"),
            None => "not indexed".to_string(),
        };
        println!("{marker} [{i}] {} ({indexed})", c.name);
    }
}

fn select_connection(connections: &Store<ConnectionState>, arg: &str) {
    let state = connections.get();
    match arg.trim().parse::<usize>().ok().and_then(|i| state.connections.get(i)) {
        Some(conn) => {
            let id = conn.id.clone();
            connections.update(|s| s.select(&id));
            println!("Using {}", conn.name);
        }
        None => println!("No such connection; \\c lists them."),
    }
}

async fn create_connection(client: &ApiClient, connections: &Store<ConnectionState>, arg: &str) {
    let Some((name, conn_string)) = arg.trim().split_once(' ') else {
        println!("Usage: \\new <name> <conn_string>");
        return;
    };
    let request = NewConnection {
        name: name.to_string(),
        connection_string: conn_string.trim().to_string(),
    };
    match client.create_connection(&request).await {
        Ok(conn) => {
            println!("Created {}", conn.name);
            connections.update(|s| s.add(conn));
        }
        Err(err) => println!("Create failed: {err}"),
    }
}

async fn test_connection(client: &ApiClient, conn_string: &str) {
    match client.test_connection(conn_string.trim()).await {
        Ok(outcome) if outcome.ok => println!("Connection OK."),
        Ok(outcome) => println!(
            "Connection failed: {}",
            outcome.error.as_deref().unwrap_or("unknown reason")
        ),
        Err(err) => println!("Connection test failed: {err}"),
    }
}

async fn remove_connection(client: &ApiClient, connections: &Store<ConnectionState>, arg: &str) {
    let state = connections.get();
    let Some(conn) = arg.trim().parse::<usize>().ok().and_then(|i| state.connections.get(i))
    else {
        println!("No such connection; \\c lists them.");
        return;
    };
    match client.delete_connection(&conn.id).await {
        Ok(()) => {
            let id = conn.id.clone();
            connections.update(|s| s.remove(&id));
            println!("Removed {}", conn.name);
        }
        Err(err) => println!("Delete failed: {err}"),
    }
}

async fn index_selected(client: &ApiClient, connections: &Store<ConnectionState>) {
    let state = connections.get();
    let Some(conn) = state.selected_connection() else {
        println!("Select a connection first (\\c N).");
        return;
    };

    let (abort, signal) = abort_pair();
    let run = client.index_schema(
        &conn.id,
        |event| match event {
            StreamEvent::Status { message } => println!("{message}"),
            StreamEvent::Progress { current, total } => {
                print!("\rIndexing {current}/{total}");
                let _ = std::io::stdout().flush();
            }
            StreamEvent::Done { table_count } => println!("\nIndexed {table_count} tables."),
            StreamEvent::Error { message } => println!("\nIndexing failed: {message}"),
            _ => {}
        },
        signal,
    );
    tokio::pin!(run);
    let outcome = tokio::select! {
        res = &mut run => res,
        _ = tokio::signal::ctrl_c() => {
            abort.abort();
            run.await
        }
    };
    match outcome {
        Ok(()) => {}
        Err(err) if err.is_cancelled() => println!(),
        Err(err) => println!("Indexing failed: {err}"),
    }
}

async fn run_question(
    client: &ApiClient,
    connections: &Store<ConnectionState>,
    session: &Store<QuerySession>,
    question: &str,
) {
    let state = connections.get();
    let Some(conn) = state.selected_connection() else {
        println!("Select a connection first (\\c N).");
        return;
    };
    session.update(|s| {
        s.set_nl_query(question);
        s.begin();
    });

    let request = QueryRequest {
        nl_query: question.to_string(),
        connection_id: conn.id.clone(),
    };
    let (abort, signal) = abort_pair();
    let mut sql_lines = 0_usize;
    let run = client.run_query(
        &request,
        |event| match event {
            StreamEvent::Status { message } => println!("{message}"),
            StreamEvent::SqlChunk { chunk } => {
                session.update(|s| s.push_chunk(&chunk));
                sql_lines = repaint_sql(&session.get().streaming_sql, sql_lines);
            }
            StreamEvent::Results(result) => session.update(|s| s.finish(result)),
            StreamEvent::Error { message } => session.update(|s| s.fail(message)),
            _ => {}
        },
        signal,
    );
    tokio::pin!(run);
    let outcome = tokio::select! {
        res = &mut run => res,
        _ = tokio::signal::ctrl_c() => {
            abort.abort();
            run.await
        }
    };
    match outcome {
        Ok(()) => {
            let current = session.get();
            if let Some(error) = &current.error {
                println!("Error: {error}");
            } else if let Some(result) = &current.result {
                print_result(result);
            }
        }
        // User-initiated cancel stays silent.
        Err(err) if err.is_cancelled() => {
            session.update(|s| s.streaming = false);
            println!();
        }
        Err(err) => {
            session.update(|s| s.fail(err.to_string()));
            println!("Error: {err}");
        }
    }
}

/// Repaint the streaming SQL block in place: move the cursor back over the
/// previous render, clear it, and print the re-highlighted buffer. Returns
/// the number of terminal lines the new render occupies.
fn repaint_sql(streaming_sql: &str, prev_lines: usize) -> usize {
    if prev_lines > 0 {
        print!("\x1b[{prev_lines}A\r\x1b[0J");
    }
    println!("{}", render_ansi(streaming_sql));
    let _ = std::io::stdout().flush();
    streaming_sql.matches('\n').count() + 1
}

fn print_result(result: &ResultSet) {
    if result.rows.is_empty() {
        println!("Query returned 0 rows.");
    } else {
        let widths: Vec<usize> = result
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                result
                    .rows
                    .iter()
                    .map(|row| display_cell(&row[i]).chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
                    .min(40)
            })
            .collect();
        let header = result
            .columns
            .iter()
            .zip(&widths)
            .map(|(name, w)| format!("{:<width$}", clip(name, *w), width = *w))
            .join(" | ");
        println!("{header}");
        println!("{}", widths.iter().map(|w| "-".repeat(*w)).join("-+-"));
        for row in &result.rows {
            let line = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{:<width$}", clip(&display_cell(cell), *w), width = *w))
                .join(" | ");
            println!("{line}");
        }
    }
    let time = if result.exec_time_ms < 1000 {
        format!("{}ms", result.exec_time_ms)
    } else {
        format!("{:.2}s", result.exec_time_ms as f64 / 1000.0)
    };
    println!(
        "{} rows · {time} · {} columns",
        result.row_count,
        result.columns.len()
    );
}

async fn show_history(
    client: &ApiClient,
    connections: &Store<ConnectionState>,
    history: &Store<HistoryState>,
) {
    let state = connections.get();
    match client.history(1, 20, state.selected.as_deref()).await {
        Ok(page) => {
            history.update(|h| {
                h.set_entries(page.items, page.total);
                h.set_page(page.page);
            });
            let current = history.get();
            if current.entries.is_empty() {
                println!("No history yet.");
                return;
            }
            for entry in &current.entries {
                println!(
                    "[{}] {}  {}",
                    entry.status,
                    entry.created_at,
                    clip(&entry.nl_query, 48)
                );
                println!(
                    "      {}",
                    clip(entry.generated_sql.as_deref().unwrap_or("-"), 72)
                );
            }
            println!("{} of ~{} entries", current.entries.len(), current.total);
        }
        Err(err) => println!("Could not load history: {err}"),
    }
}

fn export_csv(session: &Store<QuerySession>, path: &str) {
    let current = session.get();
    let Some(result) = &current.result else {
        println!("No result to export.");
        return;
    };
    match std::fs::write(path, result.to_csv()) {
        Ok(()) => println!("Saved {} rows to {path}", result.rows.len()),
        Err(err) => println!("Export failed: {err}"),
    }
}

fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(max.saturating_sub(1)).collect();
        clipped.push('…');
        clipped
    }
}

#[macro_export]
macro_rules! reexport {
    ($module:ident) => {
        $crate::reexport!($module, false);
    };
    ($module:ident, test) => {
        $crate::reexport!($module, true);
    };
    ($module:ident, $is_test:literal) => {
        #[cfg_attr($is_test, cfg(test))]
        mod $module;
        #[cfg_attr($is_test, cfg(test))]
        #[allow(unused_imports)]
        #[allow(ambiguous_glob_reexports)]
        pub use $module::*;
    };
}

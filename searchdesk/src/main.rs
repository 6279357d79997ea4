//! Interactive terminal client for the portal search service.

use std::io::{BufRead, Write};

use anyhow::Result;
use clap::Parser;

use client::api::{SearchGateway, portal_link};
use client::scope::SearchScope;
use client::session::{FilterNavigation, SearchSession, SessionPhase, run_search};
use common::search_request::{SortField, SortOrder};
use common::search_response::ResultDetail;

#[derive(Parser)]
#[command(name = "searchdesk")]
#[command(about = "Terminal client for the portal search service", long_about = None)]
struct Cli {
    /// Query to run before the prompt starts.
    query: Option<String>,

    /// Search preset: learning, knowledge or social.
    #[arg(long, default_value = "knowledge")]
    scope: String,

    /// Search service base URL; defaults to $SEARCH_API_URL.
    #[arg(long)]
    api_url: Option<String>,

    /// Portal base URL for share links; defaults to $PORTAL_URL.
    #[arg(long)]
    portal_url: Option<String>,

    /// Filter selection to start from, in the portal's `f` parameter
    /// format.
    #[arg(long)]
    filters: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let Some(scope) = SearchScope::by_name(&cli.scope) else {
        anyhow::bail!(
            "Unknown scope: {} (expected learning, knowledge or social)",
            cli.scope
        );
    };
    let gateway = match &cli.api_url {
        Some(url) => SearchGateway::new(url.clone()),
        None => SearchGateway::from_env(),
    };
    let portal_url = cli.portal_url.clone().unwrap_or_else(|| {
        std::env::var("PORTAL_URL").unwrap_or("http://localhost:3000/search".to_string())
    });

    let mut session = SearchSession::new(scope.clone());
    let mut initial = None;
    if cli.filters.is_some() {
        initial = Some(session.hydrate_filters(cli.filters.as_deref()));
    }
    if let Some(query) = &cli.query {
        // Supersedes the hydration dispatch; only the latest generation
        // may be applied anyway.
        initial = Some(session.set_query(query));
    }
    if let Some(dispatch) = initial {
        run_search(&mut session, &gateway, dispatch).await;
        render_session(&session);
    } else {
        println!(
            "searchdesk ({} scope). Type a query to search, :help for commands.",
            session.scope().name
        );
    }

    let stdin = std::io::stdin();
    let mut line = String::new();
    loop {
        print!("searchdesk> ");
        std::io::stdout().flush()?;
        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == ":quit" || input == ":q" {
            break;
        }
        handle_line(input, &mut session, &gateway, &portal_url).await;
    }
    Ok(())
}

async fn handle_line(
    input: &str,
    session: &mut SearchSession,
    gateway: &SearchGateway,
    portal_url: &str,
) {
    let (command, rest) = match input.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (input, ""),
    };
    match command {
        ":help" => print_help(),
        ":filters" => render_filters(session),
        ":add" | ":rm" => {
            let Some((key, value)) = rest.split_once(char::is_whitespace) else {
                println!("Usage: {command} <key> <value>");
                return;
            };
            let (key, value) = (key.trim(), value.trim());
            let (nav, dispatch) = if command == ":add" {
                session.add_filter(key, value)
            } else {
                session.remove_filter(key, value)
            };
            report_navigation(&nav);
            run_search(session, gateway, dispatch).await;
            render_session(session);
        }
        ":clear" => {
            let (nav, dispatch) = session.clear_filters();
            report_navigation(&nav);
            run_search(session, gateway, dispatch).await;
            render_session(session);
        }
        ":sort" => {
            if rest == "none" {
                let dispatch = session.set_sort(Vec::new());
                run_search(session, gateway, dispatch).await;
                render_session(session);
                return;
            }
            let (field, order) = match rest.split_once(char::is_whitespace) {
                Some((field, order)) => (field.trim(), order.trim()),
                None => (rest, "asc"),
            };
            if field.is_empty() {
                println!("Usage: :sort <field> [asc|desc], or :sort none");
                return;
            }
            let Some(order) = SortOrder::parse(order) else {
                println!("Sort order must be asc or desc");
                return;
            };
            let dispatch = session.set_sort(vec![SortField {
                field: field.to_string(),
                order,
            }]);
            run_search(session, gateway, dispatch).await;
            render_session(session);
        }
        ":next" => match session.next_page() {
            Some(dispatch) => {
                run_search(session, gateway, dispatch).await;
                render_session(session);
            }
            None => println!("No more pages"),
        },
        ":prev" => match session.prev_page() {
            Some(dispatch) => {
                run_search(session, gateway, dispatch).await;
                render_session(session);
            }
            None => println!("Already on the first page"),
        },
        ":page" => match rest.parse::<u64>() {
            Ok(n) if n > 0 => {
                let dispatch = session.set_page(n - 1);
                run_search(session, gateway, dispatch).await;
                render_session(session);
            }
            _ => println!("Usage: :page <number> (1-based)"),
        },
        ":open" => {
            let Ok(index) = rest.parse::<usize>() else {
                println!("Usage: :open <result number>");
                return;
            };
            let Some(item) = index
                .checked_sub(1)
                .and_then(|i| session.page().and_then(|page| page.results.get(i)))
            else {
                println!("No result #{index} on this page");
                return;
            };
            match gateway.read(&item.id).await {
                Ok(detail) => render_detail(&detail),
                Err(e) => println!("Error: {e:#}"),
            }
        }
        ":link" => match portal_link(portal_url, &session.share_query_params()) {
            Ok(url) => println!("{url}"),
            Err(e) => println!("Error: {e:#}"),
        },
        _ if command.starts_with(':') => println!("Unknown command {command}, try :help"),
        _ => {
            let dispatch = session.set_query(input);
            run_search(session, gateway, dispatch).await;
            render_session(session);
        }
    }
}

fn render_session(session: &SearchSession) {
    match session.phase() {
        SessionPhase::Failed(message) => println!("{message}"),
        SessionPhase::Empty => println!("No results"),
        SessionPhase::Populated => {
            let Some(page) = session.page() else {
                return;
            };
            for (i, item) in page.results.iter().enumerate() {
                let mut extras = Vec::new();
                if let Some(content_type) = &item.content_type {
                    extras.push(content_type.clone());
                }
                if let Some(source) = &item.source {
                    extras.push(source.clone());
                }
                if let Some(locale) = &item.locale {
                    extras.push(locale.clone());
                }
                if let Some(duration) = item.duration {
                    extras.push(format!("{duration} min"));
                }
                if extras.is_empty() {
                    println!("{:>3}. {}", i + 1, item.name);
                } else {
                    println!("{:>3}. {} ({})", i + 1, item.name, extras.join(", "));
                }
            }
            println!(
                "{} results, page {}/{}",
                page.total_hits,
                session.request().page_no + 1,
                page.page_count(session.request().page_size)
            );
        }
        SessionPhase::Idle | SessionPhase::Querying => {}
    }
}

fn render_filters(session: &SearchSession) {
    let Some(page) = session.page() else {
        println!("No facets yet, run a search first");
        return;
    };
    for filter in &page.filters {
        println!("{}", filter.display_name);
        for entry in &filter.content {
            let marker = if session.has_filter(&filter.r#type, &entry.r#type) {
                "x"
            } else {
                " "
            };
            println!("  [{marker}] {} ({})", entry.display_name, entry.count);
        }
    }
    match session.filter_param() {
        Some(f) => println!("Active: {f}"),
        None => println!("Active: none"),
    }
}

fn render_detail(detail: &ResultDetail) {
    println!("{}", detail.name);
    if let Some(description) = &detail.description {
        println!("{description}");
    }
    if let Some(content_type) = &detail.content_type {
        println!("Type: {content_type}");
    }
    if let Some(source) = &detail.source {
        println!("Source: {source}");
    }
    if let Some(locale) = &detail.locale {
        println!("Locale: {locale}");
    }
    if let Some(last_updated_on) = &detail.last_updated_on {
        println!("Updated: {last_updated_on}");
    }
    println!("Id: {}", detail.id);
}

fn report_navigation(nav: &FilterNavigation) {
    match &nav.f {
        Some(f) => println!("f={f}"),
        None => println!("f cleared"),
    }
}

fn print_help() {
    println!("Type a query to search, or:");
    println!("  :filters                   show facets and the active selection");
    println!("  :add <key> <value>         select a filter value");
    println!("  :rm <key> <value>          unselect a filter value");
    println!("  :clear                     unselect everything");
    println!("  :sort <field> [asc|desc]   sort results, :sort none to reset");
    println!("  :next / :prev / :page <n>  move through pages");
    println!("  :open <n>                  show the full record of a result row");
    println!("  :link                      print a shareable portal link");
    println!("  :quit                      exit");
}

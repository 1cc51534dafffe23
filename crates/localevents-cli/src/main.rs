// localevents CLI entry point

use localevents_cli::{output, router::CommandRouter};

#[tokio::main]
async fn main() {
    if let Err(e) = CommandRouter::route().await {
        output::print_error(&e.user_message());
        tracing::debug!("{}", e.technical_details());
        std::process::exit(1);
    }
}

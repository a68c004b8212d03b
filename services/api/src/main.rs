use portfolio_ai_api::run;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("portfolio-ai error: {err}");
        std::process::exit(1);
    }
}

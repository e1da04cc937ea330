#[tokio::main]
async fn main() {
    if let Err(e) = fanvite_backend::run().await {
        eprintln!("fanvite-backend failed to start: {}", e);
        std::process::exit(1);
    }
}

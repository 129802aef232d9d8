#[tokio::main]
async fn main() -> anyhow::Result<()> {
    seoforge_server::start().await
}

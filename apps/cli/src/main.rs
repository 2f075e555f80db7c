#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    vocab_quiz_cli::run().await
}

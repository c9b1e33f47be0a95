fn main() -> anyhow::Result<()> {
    sentiment_scope::cli::run()
}

fn main() -> anyhow::Result<()> {
    gcp_shortcuts::cli::run()
}

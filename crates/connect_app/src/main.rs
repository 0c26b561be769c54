mod app;
mod cli;
mod config;
mod effects;
mod render;
mod session;

fn main() -> anyhow::Result<()> {
    app::run_app()
}

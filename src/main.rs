mod app;
mod config;
mod controller;
mod library;
mod player;
mod playlist;
mod queue;
mod runtime;
mod session;
mod storage;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    runtime::run()
}

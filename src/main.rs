mod components;
mod config;
mod error;
mod media;
mod model;
mod parser;
mod populate;
mod transport;
mod util;

fn main() {
    util::init_logging();
    log::info!("media grid starting");
    yew::Renderer::<components::App>::new().render();
}

use ledgerly_frontend::config::AppConfig;
use ledgerly_frontend::{logging, App};

fn main() {
    logging::init(&AppConfig::from_env().log_filter);
    tracing::info!("starting ledgerly frontend");
    yew::Renderer::<App>::new().render();
}

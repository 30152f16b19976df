use env_logger::Env;
use log::info;
use mock_server::MockProfileStore;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("trace")).init();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000")
        .await
        .expect("Could not bind mock profile store");

    info!("Starting mock profile store on 127.0.0.1:3000");
    MockProfileStore::new().serve(listener).await;
}

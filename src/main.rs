#[tokio::main]
async fn main() {
    interface_monitor::boot::boot().await;
}

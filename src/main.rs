#[tokio::main]
async fn main() {
    training_booking_backend::run().await;
}

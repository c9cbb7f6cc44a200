#[actix_web::main]
async fn main() -> std::io::Result<()> {
    legal_notice_server::run().await
}

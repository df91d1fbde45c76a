use diagnosis::management::management::Management;

#[actix_web::main]
async fn main() {
    let management = match Management::new().await {
        Some(management) => management,
        None => return,
    };
    management.run().await;
    management.terminate().await;
}

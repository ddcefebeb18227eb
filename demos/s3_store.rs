use bucketframe::{Bucket, CsvReadOptions, StorageConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Credentials fall back to the ambient environment when omitted
    let storage_config = StorageConfig::aws()
        .with_option("bucket", "my-bucket-1234")
        .with_option("region", "us-east-1")
        .with_option("access_key_id", "the_access_key_id")
        .with_option("secret_access_key", "the_secret_access_key")
        .with_option("session_token", "session_token_if_needed");
    let bucket = Bucket::from_config(storage_config).await.unwrap();

    // Fetch and parse a CSV object, keeping two of its columns
    let options = CsvReadOptions::with_columns(["order_id", "total"]);
    let fetched = bucket.fetch_csv("orders/2024.csv", &options).await.unwrap();

    match fetched.into_frame() {
        Some(frame) => println!("{}", frame),
        None => println!("orders/2024.csv is not a csv file"),
    }
}

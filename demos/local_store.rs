use bucketframe::{Bucket, CsvReadOptions, CsvWriteOptions, StorageConfig, TabularFrame};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let data_dir = std::env::temp_dir().join("bucketframe-demo");
    std::fs::create_dir_all(&data_dir).unwrap();

    let storage_config =
        StorageConfig::local().with_option("path", data_dir.to_str().unwrap());
    let bucket = Bucket::from_config(storage_config).await.unwrap();

    // Store a frame as CSV, then read it back
    let frame = TabularFrame::new(
        vec!["city".to_string(), "population".to_string()],
        vec![
            vec!["Basel".to_string(), "178500".to_string()],
            vec!["Geneva".to_string(), "203900".to_string()],
        ],
    )
    .unwrap();

    bucket
        .store_csv(&frame, "cities/ch.csv", &CsvWriteOptions::default())
        .await
        .unwrap();

    let fetched = bucket
        .fetch_csv("cities/ch.csv", &CsvReadOptions::default())
        .await
        .unwrap();
    println!("{}", fetched.into_frame().unwrap());

    // List everything under the bucket
    for entry in bucket.list_prefix("").await.unwrap() {
        println!("{} ({} bytes)", entry.key, entry.size);
    }
}

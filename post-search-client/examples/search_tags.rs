use post_search_client::{PostClient, SearchOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let tags = std::env::args().nth(1).unwrap_or_else(|| "tech,history".to_string());
    let sort_by = std::env::args().nth(2);
    let direction = std::env::args().nth(3);
    let options = SearchOptions::parse(Some(tags.as_str()), sort_by.as_deref(), direction.as_deref())?;

    let client = PostClient::default();

    let start = std::time::Instant::now();
    let posts = client.search(&options).await?;
    println!("Found {} posts for {:?} in {:?}", posts.len(), options.tags(), start.elapsed());

    for post in posts.iter().take(10) {
        println!(
            "#{:<4} {:<20} likes={:<5} reads={:<6} popularity={:.2}",
            post.id(),
            post.author(),
            post.likes(),
            post.reads(),
            post.popularity()
        );
    }

    Ok(())
}

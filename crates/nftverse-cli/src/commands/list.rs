use anyhow::Result;

use nftverse_core::{
    market::{accumulate, fetch_page, filter, sort, store::open_store, SortMode},
    AppConfig,
};

pub async fn run(
    config: &AppConfig,
    page: u32,
    all: bool,
    query: Option<&str>,
    mode: SortMode,
) -> Result<()> {
    let store = open_store(config).await?;
    let page_size = config.listing.page_size();

    let mut records = Vec::new();
    let mut total = 0;
    let mut next = Some(if all { 0 } else { page });

    while let Some(index) = next {
        let result = fetch_page(store.as_ref(), index, page_size).await?;
        tracing::debug!(page = index, count = result.records.len(), "Fetched page");
        total = result.total;
        let empty = result.records.is_empty();
        records = accumulate(records, result.records);
        next = if all && !empty { result.next_page } else { None };
    }

    let matched = filter(&records, query.unwrap_or(""));
    let ordered = sort(&matched, mode);

    if ordered.is_empty() {
        println!("No NFTs found.");
        if query.is_some() {
            println!("\nTry adjusting your search criteria.");
        }
        return Ok(());
    }

    println!(
        "NFTs ({} shown, {} loaded, {} total, {}):\n",
        ordered.len(),
        records.len(),
        total,
        mode.label()
    );

    for record in ordered {
        println!("  {} by {}", record.name, record.creator);
        println!("    Price: {} ETH", record.price);
        match record.created_at_value() {
            Some(created) => println!("    Created: {}", created.format("%Y-%m-%d %H:%M")),
            None => println!("    Created: {}", record.created_at),
        }
        println!("    Image: {}", record.image);
        println!();
    }

    Ok(())
}

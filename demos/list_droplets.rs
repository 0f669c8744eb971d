use anyhow::Result;
use doapi::Client;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // RUST_LOG=doapi=debug shows every request.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Configure the token via DIGITALOCEAN_TOKEN or a `.doapirc` file.
    let client = Client::from_env()?;

    let account = client.account_info()?;
    println!("account: {}", account["account"]["email"]);

    let size = "s-1vcpu-1gb";
    let check = client.validate_size(size);
    println!("size {size}: {check:?}");

    let droplets = client.list_droplets()?;
    for d in droplets["droplets"].as_array().into_iter().flatten() {
        println!("{}\t{}\t{}", d["id"], d["name"], d["status"]);
    }
    Ok(())
}

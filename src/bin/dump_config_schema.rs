use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();
    let schema = tracemark::Config::json_schema();
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}

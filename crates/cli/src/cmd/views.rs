use anyhow::Result;

use fsattr_platform::Provider;

use crate::output::{OutputFormat, print_json, print_stat, symbols};

pub fn cmd_views(provider: &Provider, output: OutputFormat) -> Result<()> {
  let views = provider.supported_views();

  if output.is_json() {
    print_json(&serde_json::json!({ "platform": provider.family(), "views": views }))?;
  } else {
    print_stat("Platform", provider.family().as_str());
    println!();
    for view in views {
      println!("  {} {}", symbols::INFO, view);
    }
  }

  Ok(())
}

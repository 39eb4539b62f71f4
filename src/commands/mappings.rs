//! Mappings command - list the entity mapping table

use crate::core::context::RewriteContext;
use crate::core::error::RewriteResult;
use crate::rewrite::EntityMapping;

/// Run the mappings command
pub fn run_mappings(ctx: &RewriteContext, json: bool) -> RewriteResult<()> {
  if json {
    println!("{}", serde_json::to_string_pretty(&ctx.mapping)?);
  } else {
    print!("{}", render_mappings(&ctx.mapping));
  }
  Ok(())
}

fn render_mappings(mapping: &EntityMapping) -> String {
  if mapping.is_empty() {
    return "No entity mappings configured\n".to_string();
  }

  let width = mapping.iter().map(|(key, _)| key.len()).max().unwrap_or(0);

  let mut out = format!("📋 Entity mappings ({} entries)\n\n", mapping.len());
  for (key, path) in mapping.iter() {
    out.push_str(&format!("   {:<width$}  →  {}\n", key, path, width = width));
  }
  out
}

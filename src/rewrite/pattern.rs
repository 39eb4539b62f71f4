//! Relative entity import detection and substitution
//!
//! Matching is purely textual: any `from './<key>.entity'` substring is a hit,
//! including ones sitting inside comments or string literals.

use crate::core::error::RewriteResult;
use crate::rewrite::mapping::EntityMapping;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// `from './<key>.entity'` with either quote style; group 1 is the entity key
pub const RELATIVE_ENTITY_IMPORT: &str = r#"from\s+['"]\./([^'"]+\.entity)['"]"#;

/// One import clause that was swapped for its aliased path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacedImport {
  /// 1-based line of the original clause
  pub line: usize,
  pub key: String,
  pub aliased_path: String,
}

/// A relative entity import whose key has no mapping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmappedImport {
  pub line: usize,
  pub key: String,
}

/// In-memory result of rewriting one source text
#[derive(Debug)]
pub struct SourceRewrite<'a> {
  pub content: Cow<'a, str>,
  pub replaced: Vec<ReplacedImport>,
  pub unmapped: Vec<UnmappedImport>,
}

/// Compiled relative-import pattern
#[derive(Debug, Clone)]
pub struct ImportPattern {
  regex: Regex,
}

impl ImportPattern {
  pub fn new() -> RewriteResult<Self> {
    Ok(Self {
      regex: Regex::new(RELATIVE_ENTITY_IMPORT)?,
    })
  }

  /// Replace every mapped relative entity import in `source`.
  ///
  /// Replacements always use single quotes. Unmapped keys are left verbatim
  /// and reported. When nothing is replaced the input is returned borrowed.
  pub fn rewrite<'a>(&self, source: &'a str, mapping: &EntityMapping) -> SourceRewrite<'a> {
    let mut replaced = Vec::new();
    let mut unmapped = Vec::new();
    let mut output = String::new();
    let mut last_end = 0;
    let mut line = 1;
    let mut counted_to = 0;

    for caps in self.regex.captures_iter(source) {
      let clause = caps.get_match();
      let key = &caps[1];
      // Matches come in order, so only the gap since the previous one is scanned
      line += newlines(&source[counted_to..clause.start()]);
      counted_to = clause.start();

      match mapping.lookup(key) {
        Some(aliased_path) => {
          output.push_str(&source[last_end..clause.start()]);
          output.push_str("from '");
          output.push_str(aliased_path);
          output.push('\'');
          last_end = clause.end();

          replaced.push(ReplacedImport {
            line,
            key: key.to_string(),
            aliased_path: aliased_path.to_string(),
          });
        }
        None => unmapped.push(UnmappedImport {
          line,
          key: key.to_string(),
        }),
      }
    }

    let content = if replaced.is_empty() {
      Cow::Borrowed(source)
    } else {
      output.push_str(&source[last_end..]);
      Cow::Owned(output)
    };

    SourceRewrite {
      content,
      replaced,
      unmapped,
    }
  }
}

fn newlines(text: &str) -> usize {
  text.bytes().filter(|b| *b == b'\n').count()
}

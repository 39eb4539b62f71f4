//! Integration tests for the rewrite run

use crate::helpers::{ENTITIES_DIR, TestRepo, run_entity_imports, run_entity_imports_raw, stderr, stdout};
use anyhow::Result;

const USER_ENTITY: &str = "\
import { Entity, ManyToOne, OneToMany } from 'typeorm';
import { Tenant } from './tenant.entity';
import { UserRole } from \"./user-role.entity\";

@Entity('users')
export class User {
  @ManyToOne(() => Tenant)
  tenant: Tenant;

  @OneToMany(() => UserRole, (role) => role.user)
  roles: UserRole[];
}
";

#[test]
fn test_rewrites_relative_imports() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_entity("auth/user.entity.ts", USER_ENTITY)?;

  let output = run_entity_imports(&repo.path, &[])?;
  let out = stdout(&output);

  assert!(out.contains(&format!("Updated: {}/auth/user.entity.ts", ENTITIES_DIR)));
  assert!(out.contains("Processed 1 files, 1 updated."));

  let rewritten = repo.read_entity("auth/user.entity.ts")?;
  assert!(rewritten.contains("import { Tenant } from '@libs/infrastructure/entities/system/tenant.entity';"));
  assert!(rewritten.contains("import { UserRole } from '@libs/infrastructure/entities/auth/user-role.entity';"));
  assert!(rewritten.contains("from 'typeorm';"));

  Ok(())
}

#[test]
fn test_rewrite_subcommand_matches_default() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_entity("billing/invoice.entity.ts", "import { Payment } from './payment.entity';\n")?;

  let output = run_entity_imports(&repo.path, &["rewrite"])?;
  assert!(stdout(&output).contains("Processed 1 files, 1 updated."));
  assert_eq!(
    repo.read_entity("billing/invoice.entity.ts")?,
    "import { Payment } from '@libs/infrastructure/entities/billing/payment.entity';\n"
  );

  Ok(())
}

#[test]
fn test_files_without_imports_untouched() -> Result<()> {
  let repo = TestRepo::new()?;
  let content = "import { Entity, Column } from 'typeorm';\n\n@Entity()\nexport class Country {\n  @Column()\n  code: string;\n}\n";
  repo.add_entity("system/country.entity.ts", content)?;

  let output = run_entity_imports(&repo.path, &[])?;
  let out = stdout(&output);

  assert!(!out.contains("Updated:"));
  assert!(out.contains("Processed 1 files, 0 updated."));
  assert_eq!(repo.read_entity("system/country.entity.ts")?, content);

  Ok(())
}

#[test]
fn test_unmapped_import_preserved() -> Result<()> {
  let repo = TestRepo::new()?;
  let content = "import { AuditLog } from './audit-log.entity';\n";
  repo.add_entity("system/tenant.entity.ts", content)?;

  let output = run_entity_imports(&repo.path, &[])?;
  let out = stdout(&output);

  assert!(out.contains("Processed 1 files, 0 updated."));
  assert!(out.contains("audit-log.entity"));
  assert_eq!(repo.read_entity("system/tenant.entity.ts")?, content);

  Ok(())
}

#[test]
fn test_mixed_imports_two_of_three_rewritten() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_entity(
    "loyalty/reward.entity.ts",
    "import { Program } from './loyalty-program.entity';\nimport { Legacy } from './legacy-reward.entity';\nimport { Code } from './redemption-code.entity';\n",
  )?;

  let output = run_entity_imports(&repo.path, &[])?;
  assert!(stdout(&output).contains("Processed 1 files, 1 updated."));

  assert_eq!(
    repo.read_entity("loyalty/reward.entity.ts")?,
    "import { Program } from '@libs/infrastructure/entities/loyalty/loyalty-program.entity';\nimport { Legacy } from './legacy-reward.entity';\nimport { Code } from '@libs/infrastructure/entities/loyalty/redemption-code.entity';\n"
  );

  Ok(())
}

#[test]
fn test_second_run_is_noop() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_entity("auth/user.entity.ts", USER_ENTITY)?;
  repo.add_entity("partner/branch.entity.ts", "import { Partner } from './partner.entity';\n")?;

  let first = run_entity_imports(&repo.path, &[])?;
  assert!(stdout(&first).contains("Processed 2 files, 2 updated."));
  let user_after_first = repo.read_entity("auth/user.entity.ts")?;

  let second = run_entity_imports(&repo.path, &[])?;
  let out = stdout(&second);
  assert!(out.contains("Processed 2 files, 0 updated."));
  assert!(!out.contains("Updated:"));
  assert_eq!(repo.read_entity("auth/user.entity.ts")?, user_after_first);

  Ok(())
}

#[test]
fn test_traversal_is_exhaustive() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_entity("root.entity.ts", "")?;
  repo.add_entity("auth/user.entity.ts", "")?;
  repo.add_entity("billing/plans/pricing-plan.entity.ts", "")?;
  repo.add_entity("a/b/c/d/deep.entity.ts", "")?;
  repo.add_entity("auth/user.repository.ts", "import { User } from './user.entity';\n")?;
  repo.add_entity("auth/README.md", "")?;
  // Outside the entities directory
  repo.write_file("libs/infrastructure/src/other.entity.ts", "")?;

  let output = run_entity_imports(&repo.path, &[])?;
  assert!(stdout(&output).contains("Processed 4 files, 0 updated."));

  Ok(())
}

#[cfg(unix)]
#[test]
fn test_symlinked_directories_are_counted_once() -> Result<()> {
  let repo = TestRepo::new()?;
  let user = repo.add_entity("auth/user.entity.ts", USER_ENTITY)?;
  let entities = repo.path.join(ENTITIES_DIR);
  std::os::unix::fs::symlink(entities.join("auth"), entities.join("auth-link"))?;
  std::os::unix::fs::symlink(&entities, entities.join("auth/loop"))?;

  let output = run_entity_imports(&repo.path, &[])?;
  let out = stdout(&output);
  assert!(out.contains("Processed 1 files, 1 updated."));
  assert_eq!(out.matches("Updated: ").count(), 1);
  assert!(std::fs::read_to_string(user)?.contains("@libs/infrastructure/entities/system/tenant.entity"));

  Ok(())
}

#[test]
fn test_missing_entities_dir_is_not_fatal() -> Result<()> {
  let repo = TestRepo::bare()?;

  let output = run_entity_imports_raw(&repo.path, &[])?;
  assert!(output.status.success());
  assert!(stderr(&output).contains("Directory does not exist"));
  assert!(!stdout(&output).contains("Processed"));

  Ok(())
}

#[test]
fn test_unreadable_file_does_not_stop_run() -> Result<()> {
  let repo = TestRepo::new()?;
  let broken = repo.add_entity("a/broken.entity.ts", "")?;
  std::fs::write(&broken, [0xff, 0xfe, 0x00, 0x41])?;
  repo.add_entity("b/user.entity.ts", "import { Tenant } from './tenant.entity';\n")?;

  let output = run_entity_imports(&repo.path, &[])?;
  assert!(stderr(&output).contains("Error processing"));
  assert!(stderr(&output).contains("broken.entity.ts"));
  assert!(stdout(&output).contains("Processed 2 files, 1 updated."));
  assert!(repo.read_entity("b/user.entity.ts")?.contains("@libs/infrastructure/entities/system/tenant.entity"));

  Ok(())
}

#[test]
fn test_strict_exits_non_zero_on_failures() -> Result<()> {
  let repo = TestRepo::new()?;
  let broken = repo.add_entity("broken.entity.ts", "")?;
  std::fs::write(&broken, [0xff])?;

  let output = run_entity_imports_raw(&repo.path, &["--strict"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stdout(&output).contains("Processed 1 files, 0 updated."));
  assert!(stderr(&output).contains("could not be processed"));

  Ok(())
}

#[test]
fn test_dry_run_writes_nothing() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_entity("auth/user.entity.ts", USER_ENTITY)?;

  let output = run_entity_imports(&repo.path, &["--dry-run"])?;
  let out = stdout(&output);
  assert!(out.contains("Would update:"));
  assert!(out.contains("Processed 1 files, 1 updated."));
  assert_eq!(repo.read_entity("auth/user.entity.ts")?, USER_ENTITY);

  Ok(())
}

#[test]
fn test_json_report() -> Result<()> {
  let repo = TestRepo::new()?;
  repo.add_entity("auth/user.entity.ts", USER_ENTITY)?;
  repo.add_entity("auth/role.entity.ts", "export class Role {}\n")?;

  let output = run_entity_imports(&repo.path, &["--json"])?;
  let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("Should be valid JSON");

  assert_eq!(json["total_files"], 2);
  assert_eq!(json["updated_files"], 1);
  assert_eq!(json["failed_files"], 0);
  assert_eq!(json["dry_run"], false);
  assert_eq!(json["files"][0]["replaced"].as_array().map(Vec::len), Some(2));
  assert_eq!(json["files"][0]["replaced"][0]["key"], "tenant.entity");

  Ok(())
}

#[test]
fn test_base_dir_and_entities_dir_flags() -> Result<()> {
  let repo = TestRepo::bare()?;
  repo.write_file("src/models/goal.entity.ts", "import { Partner } from './partner.entity';\n")?;

  let cwd = std::env::temp_dir();
  let base = repo.path.to_string_lossy().into_owned();
  let output = run_entity_imports(&cwd, &["--base-dir", &base, "--entities-dir", "src/models"])?;
  assert!(stdout(&output).contains("Processed 1 files, 1 updated."));

  let content = std::fs::read_to_string(repo.path.join("src/models/goal.entity.ts"))?;
  assert_eq!(
    content,
    "import { Partner } from '@libs/infrastructure/entities/partner/partner.entity';\n"
  );

  Ok(())
}

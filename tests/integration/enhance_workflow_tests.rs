/*!
 * End-to-end enhancement workflow tests
 */

use std::fs;
use anyhow::Result;
use tenhance::app_config::Config;
use tenhance::app_controller::Controller;
use tenhance::enhance::{EnhancementKind, EnhancementOp};
use crate::common;

fn ops(kind: EnhancementKind, target: &str) -> Vec<EnhancementOp> {
    vec![EnhancementOp::new(kind, target)]
}

/// Test that a single text file produces an enhanced_ copy
#[test]
fn test_run_withSingleTextFile_shouldWriteEnhancedFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_file(&dir, "story.txt", "hello world")?;
    let output_dir = dir.join("out");

    let controller = Controller::new_for_test()?;
    controller.run(
        input,
        output_dir.clone(),
        &ops(EnhancementKind::Pause, "world"),
        false,
    )?;

    let output = fs::read_to_string(output_dir.join("enhanced_story.txt"))?;
    assert_eq!(output, "hello world...");

    Ok(())
}

/// Test that existing output is preserved unless overwrite is forced
#[test]
fn test_run_withExistingOutput_shouldSkipUnlessForced() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_file(&dir, "story.txt", "hello world")?;
    let output_dir = dir.join("out");
    fs::create_dir_all(&output_dir)?;
    fs::write(output_dir.join("enhanced_story.txt"), "stale")?;

    let controller = Controller::new_for_test()?;

    // Without force the stale output survives
    controller.run(
        input.clone(),
        output_dir.clone(),
        &ops(EnhancementKind::Pause, "world"),
        false,
    )?;
    assert_eq!(fs::read_to_string(output_dir.join("enhanced_story.txt"))?, "stale");

    // With force it is replaced
    controller.run(
        input,
        output_dir.clone(),
        &ops(EnhancementKind::Pause, "world"),
        true,
    )?;
    assert_eq!(
        fs::read_to_string(output_dir.join("enhanced_story.txt"))?,
        "hello world..."
    );

    Ok(())
}

/// Test that a multi-entry archive produces an enhanced archive
#[test]
fn test_run_withArchive_shouldWriteEnhancedArchive() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let zip_bytes = common::build_zip(&[
        ("first.txt", b"hello world".as_slice()),
        ("second.txt", b"goodbye world".as_slice()),
    ])?;
    let input = dir.join("texts.zip");
    fs::write(&input, &zip_bytes)?;
    let output_dir = dir.join("out");

    let controller = Controller::new_for_test()?;
    controller.run(
        input,
        output_dir.clone(),
        &ops(EnhancementKind::Quote, "world"),
        false,
    )?;

    let packed = fs::read(output_dir.join("enhanced_texts.zip"))?;
    let entries = common::read_zip_entries(&packed)?;

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].0, "enhanced_first.txt");
    assert_eq!(entries[0].1, "hello \"world\"");
    assert_eq!(entries[1].0, "enhanced_second.txt");
    assert_eq!(entries[1].1, "goodbye \"world\"");

    Ok(())
}

/// Test that an archive with a single text entry emits a plain file
#[test]
fn test_run_withSingleEntryArchive_shouldWritePlainFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let zip_bytes = common::build_zip(&[("only.txt", b"hello world".as_slice())])?;
    let input = dir.join("texts.zip");
    fs::write(&input, &zip_bytes)?;
    let output_dir = dir.join("out");

    let controller = Controller::new_for_test()?;
    controller.run(
        input,
        output_dir.clone(),
        &ops(EnhancementKind::Question, "world"),
        false,
    )?;

    let output = fs::read_to_string(output_dir.join("enhanced_only.txt"))?;
    assert_eq!(output, "hello world?");
    assert!(!output_dir.join("enhanced_texts.zip").exists());

    Ok(())
}

/// Test that one undecodable entry does not abort the rest of the archive
#[test]
fn test_run_withPartiallyBadArchive_shouldEnhanceSurvivors() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let zip_bytes = common::build_zip(&[
        ("good.txt", b"hello world".as_slice()),
        ("bad.txt", &[0xFF, 0xFE]),
        ("fine.txt", b"wide world".as_slice()),
    ])?;
    let input = dir.join("texts.zip");
    fs::write(&input, &zip_bytes)?;
    let output_dir = dir.join("out");

    let controller = Controller::new_for_test()?;
    controller.run(
        input,
        output_dir.clone(),
        &ops(EnhancementKind::Pause, "world"),
        false,
    )?;

    let packed = fs::read(output_dir.join("enhanced_texts.zip"))?;
    let entries = common::read_zip_entries(&packed)?;

    let names: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["enhanced_good.txt", "enhanced_fine.txt"]);

    Ok(())
}

/// Test that invalid archive bytes fail the whole request
#[test]
fn test_run_withCorruptArchive_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = dir.join("broken.zip");
    fs::write(&input, b"not an archive at all")?;
    let output_dir = dir.join("out");

    let controller = Controller::new_for_test()?;
    let result = controller.run(input, output_dir, &[], false);

    assert!(result.is_err());
    Ok(())
}

/// Test directory mode enhances every matching file
#[test]
fn test_run_withDirectory_shouldEnhanceEveryTextFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input_dir = dir.join("texts");
    fs::create_dir_all(&input_dir)?;
    common::create_test_file(&input_dir, "a.txt", "hello world")?;
    common::create_test_file(&input_dir, "b.txt", "small world")?;
    common::create_test_file(&input_dir, "ignore.bin", "world")?;
    let output_dir = dir.join("out");

    let controller = Controller::new_for_test()?;
    controller.run(
        input_dir,
        output_dir.clone(),
        &ops(EnhancementKind::Emotion, "world"),
        false,
    )?;

    assert_eq!(
        fs::read_to_string(output_dir.join("enhanced_a.txt"))?,
        "hello **world**"
    );
    assert_eq!(
        fs::read_to_string(output_dir.join("enhanced_b.txt"))?,
        "small **world**"
    );
    assert!(!output_dir.join("enhanced_ignore.bin").exists());

    Ok(())
}

/// Test that a missing input path fails cleanly
#[test]
fn test_run_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::new_for_test()?;

    let result = controller.run(
        temp_dir.path().join("does_not_exist.txt"),
        temp_dir.path().to_path_buf(),
        &[],
        false,
    );

    assert!(result.is_err());
    Ok(())
}

/// Test that ordered operations compose across the whole pipeline
#[test]
fn test_run_withChainedOps_shouldApplyInOrder() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let input = common::create_test_file(&dir, "chain.txt", "hello world")?;
    let output_dir = dir.join("out");

    let chained = vec![
        EnhancementOp::new(EnhancementKind::Pause, "world"),
        EnhancementOp::new(EnhancementKind::Quote, "world..."),
    ];

    let controller = Controller::new_for_test()?;
    controller.run(input, output_dir.clone(), &chained, false)?;

    let output = fs::read_to_string(output_dir.join("enhanced_chain.txt"))?;
    assert_eq!(output, "hello \"world...\"");

    Ok(())
}

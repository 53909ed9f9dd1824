use std::error::Error;
use std::io::Write;
use std::path::PathBuf;

use wigcov::{parse_file, WigError, WigParser};

fn test_track(name: &str) -> PathBuf {
    let mut dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    dir.push("resources/test");
    dir.push(name);
    dir
}

#[test]
fn test_two_chunk_end_to_end() -> Result<(), Box<dyn Error>> {
    let genome = parse_file(test_track("two_chunks.wig"))?;
    assert_eq!(genome.metadata().get("type").unwrap(), "wiggle_0");

    let chrom = genome.get("chrI").unwrap();
    let (forward, reverse) = chrom.get_coverage(1, 109);
    assert_eq!(forward.len(), 109);
    assert_eq!(reverse, vec![0.0; 109]);

    // first declaration: start=1 step=10 span=5, values 1..=5
    let mut expected = vec![0.0f32; 109];
    for (i, value) in (1..=5).enumerate() {
        let declared = 1 + i as u32 * 10;
        for pos in declared..declared + 5 {
            expected[(pos - 1) as usize] = value as f32;
        }
    }
    // second declaration: start=100 step=10 span=1; only position 100 is
    // inside the queried window
    expected[99] = 1.0;
    assert_eq!(forward, expected);
    Ok(())
}

#[test]
fn test_mixed_track() -> Result<(), Box<dyn Error>> {
    let genome = parse_file(test_track("mixed.wig"))?;
    assert_eq!(genome.metadata().get("name").unwrap(), "mixed steps");
    assert_eq!(
        genome.metadata().get("description").unwrap(),
        "fixed and variable"
    );
    assert_eq!(genome.len(), 2);

    let chr1 = genome.get("chrI").unwrap();
    let (forward, reverse) = chr1.get_coverage(9, 53);
    let at = |pos: u32| (pos - 9) as usize;

    // fixedStep start=10 step=5 span=2: 3.5 forward at 10, -4 reverse at
    // 15, 0 forward at 20
    assert_eq!(forward[at(9)], 0.0);
    assert_eq!(forward[at(10)], 3.5);
    assert_eq!(forward[at(11)], 3.5);
    assert_eq!(forward[at(12)], 0.0);
    assert_eq!(reverse[at(15)], 4.0);
    assert_eq!(reverse[at(16)], 4.0);
    assert_eq!(forward[at(20)], 0.0);

    // variableStep span=3: 1.5 forward at 40, -2.5 reverse at 50
    assert_eq!(forward[at(40)], 1.5);
    assert_eq!(forward[at(42)], 1.5);
    assert_eq!(forward[at(43)], 0.0);
    assert_eq!(reverse[at(50)], 2.5);
    assert_eq!(reverse[at(52)], 2.5);

    let chr2 = genome.get("chrII").unwrap();
    let (forward, reverse) = chr2.get_coverage(7, 9);
    assert_eq!(forward, vec![12.0, 0.0, 0.0]);
    assert_eq!(reverse, vec![0.0, 0.0, 8.0]);
    Ok(())
}

#[test]
fn test_gzip_input_matches_plain() -> Result<(), Box<dyn Error>> {
    let plain = parse_file(test_track("mixed.wig"))?;
    let gzipped = parse_file(test_track("mixed.wig.gz"))?;

    assert_eq!(plain.metadata(), gzipped.metadata());
    assert_eq!(plain.len(), gzipped.len());
    for chrom in plain.chromosomes() {
        let other = gzipped.get(chrom.name()).unwrap();
        assert_eq!(chrom.get_coverage(1, 200), other.get_coverage(1, 200));
    }
    Ok(())
}

#[test]
fn test_parse_file_from_scratch_path() -> Result<(), Box<dyn Error>> {
    let mut track = tempfile::NamedTempFile::new()?;
    track.write_all(b"variableStep chrom=plasmid span=4\n3 6\n")?;
    track.flush()?;

    let genome = parse_file(track.path())?;
    let (forward, _) = genome.get("plasmid").unwrap().get_coverage(1, 8);
    assert_eq!(forward, vec![0.0, 0.0, 6.0, 6.0, 6.0, 6.0, 0.0, 0.0]);
    Ok(())
}

#[test]
fn test_overlapping_chunks_first_wins() -> Result<(), Box<dyn Error>> {
    let track = "fixedStep chrom=chrI start=10\n1\n1\n1\nfixedStep chrom=chrI start=11\n9\n9\n9\n";
    let genome = WigParser::new(track.as_bytes()).parse()?;
    let (forward, _) = genome.get("chrI").unwrap().get_coverage(10, 14);
    assert_eq!(forward, vec![1.0, 1.0, 1.0, 9.0, 9.0]);
    Ok(())
}

#[test]
fn test_zero_fill_far_outside_declared_data() -> Result<(), Box<dyn Error>> {
    let genome = parse_file(test_track("mixed.wig"))?;
    let (forward, reverse) = genome.get("chrII").unwrap().get_coverage(1000, 1099);
    assert_eq!(forward, vec![0.0; 100]);
    assert_eq!(reverse, vec![0.0; 100]);
    Ok(())
}

#[test]
fn test_data_before_declaration_aborts() {
    let err = WigParser::new(&b"track type=wiggle_0\n5\n"[..])
        .parse()
        .unwrap_err();
    assert!(matches!(err, WigError::DataOutsideChunk { line: 2, .. }));
}

#[test]
fn test_malformed_declaration_aborts() {
    let err = WigParser::new(&b"fixedStep chrom=chrI\n5\n"[..])
        .parse()
        .unwrap_err();
    assert!(matches!(err, WigError::Declaration { line: 1, .. }));
}

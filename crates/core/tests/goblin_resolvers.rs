#![cfg(feature = "goblin-formats")]

use object::write::{Object, StandardSegment};
use object::{Architecture, BinaryFormat, Endianness, SectionKind};

use entropy_core::config::DEFAULT_WINDOW_SIZE;
use entropy_core::model::{FileKind, Measurement};
use entropy_core::services::detect::{FileTypeDetector, ObjectDetector};
use entropy_core::services::regions::{
    analyze_regions, default_resolver_registry, RegionAnalyzer, RegionResolver,
};
use entropy_core::services::resolvers::{
    ElfSectionResolver, MachOSectionResolver, PeSectionResolver,
};
use entropy_core::{EntropyError, FileSession};

/// Minimal PE32 image: DOS header, COFF header without optional header, and
/// three sections: raw data at 0x200 (`0x90` fill) and 0x300 (byte ramp),
/// then an uninitialized `.bss` with no raw bytes.
fn minimal_pe() -> Vec<u8> {
    let mut image = vec![0u8; 0x400];
    image[0..2].copy_from_slice(b"MZ");
    image[0x3c..0x40].copy_from_slice(&0x40u32.to_le_bytes());
    image[0x40..0x44].copy_from_slice(b"PE\0\0");

    let coff = 0x44;
    image[coff..coff + 2].copy_from_slice(&0x014cu16.to_le_bytes());
    image[coff + 2..coff + 4].copy_from_slice(&3u16.to_le_bytes());
    image[coff + 18..coff + 20].copy_from_slice(&0x0102u16.to_le_bytes());

    let sections: [(&[u8; 8], u32, u32, u32); 3] = [
        (b".text\0\0\0", 0x200, 0x100, 0x100),
        (b".rdata\0\0", 0x300, 0x100, 0x100),
        (b".bss\0\0\0\0", 0, 0, 0x800),
    ];
    for (idx, (name, raw_ptr, raw_size, virtual_size)) in sections.iter().enumerate() {
        let at = coff + 20 + idx * 40;
        image[at..at + 8].copy_from_slice(&name[..]);
        image[at + 8..at + 12].copy_from_slice(&virtual_size.to_le_bytes());
        image[at + 12..at + 16].copy_from_slice(&(0x1000u32 * (idx as u32 + 1)).to_le_bytes());
        image[at + 16..at + 20].copy_from_slice(&raw_size.to_le_bytes());
        image[at + 20..at + 24].copy_from_slice(&raw_ptr.to_le_bytes());
    }

    image[0x200..0x300].fill(0x90);
    for (i, b) in image[0x300..0x400].iter_mut().enumerate() {
        *b = i as u8;
    }
    image
}

fn elf_fixture() -> (Vec<u8>, Vec<u8>) {
    let mut obj = Object::new(BinaryFormat::Elf, Architecture::X86_64, Endianness::Little);
    let text_id = obj.add_section(Vec::new(), b".text".to_vec(), SectionKind::Text);
    let text: Vec<u8> = (0..512u32).map(|i| (i * 37 % 256) as u8).collect();
    obj.section_mut(text_id).set_data(text.clone(), 16);
    let bss_id = obj.add_section(Vec::new(), b".bss".to_vec(), SectionKind::UninitializedData);
    obj.section_mut(bss_id).append_bss(4096, 16);
    (obj.write().unwrap(), text)
}

#[test]
fn pe_resolver_reports_raw_section_bounds_in_file_order() {
    let regions = PeSectionResolver.resolve(&minimal_pe()).expect("resolve pe");
    assert_eq!(regions.len(), 3);
    assert_eq!(regions[0].name, ".text");
    assert_eq!((regions[0].offset, regions[0].length), (0x200, 0x100));
    assert_eq!(regions[1].name, ".rdata");
    assert_eq!((regions[1].offset, regions[1].length), (0x300, 0x100));
    assert_eq!(regions[2].name, ".bss");
    assert_eq!(regions[2].length, 0);
}

#[test]
fn pe_sections_feed_the_region_analyzer() {
    let registry = default_resolver_registry();
    let analyzer = RegionAnalyzer { registry: &registry, detector: &ObjectDetector };
    let session = FileSession::from_bytes(minimal_pe());
    assert_eq!(ObjectDetector.detect(session.data()), FileKind::Pe);

    let report = analyzer.entropy(&session, true).expect("section entropy");
    assert_eq!(report.resolver, "pe-sections");
    assert_eq!(report.results[0].measurement, Measurement::Aggregate(0.0));
    let ramp = report.results[1].measurement.as_aggregate().unwrap();
    assert!((ramp - 1.0).abs() < 1e-12);

    let running = analyzer.running_entropy(&session, 64, false).expect("section series");
    assert_eq!(running.results[1].measurement.as_series().map(|s| s.len()), Some(4));
}

#[test]
fn pe_sections_with_default_window_include_empty_section() {
    let registry = default_resolver_registry();
    let analyzer = RegionAnalyzer { registry: &registry, detector: &ObjectDetector };
    let session = FileSession::from_bytes(minimal_pe());

    let running =
        analyzer.running_entropy(&session, DEFAULT_WINDOW_SIZE, true).expect("section series");
    let lens: Vec<_> =
        running.results.iter().map(|r| r.measurement.as_series().map(|s| s.len())).collect();
    assert_eq!(lens, vec![Some(1), Some(1), Some(0)]);

    let aggregates = analyzer.entropy(&session, true).expect("section aggregates");
    assert_eq!(aggregates.results[2].measurement, Measurement::Aggregate(0.0));
}

#[test]
fn elf_resolver_skips_sections_without_file_bytes() {
    let (bytes, text) = elf_fixture();
    let regions = ElfSectionResolver.resolve(&bytes).expect("resolve elf");
    assert!(regions.iter().all(|r| r.name != ".bss" && !r.name.is_empty()));

    let text_region = regions.iter().find(|r| r.name == ".text").expect(".text region");
    assert_eq!(text_region.length, text.len());
    assert_eq!(&bytes[text_region.offset..text_region.offset + text_region.length], &text[..]);
}

#[test]
fn elf_regions_analyze_against_session_with_default_window() {
    let (bytes, _) = elf_fixture();
    let session = FileSession::from_bytes(bytes);
    assert_eq!(ObjectDetector.detect(session.data()), FileKind::Elf);

    let regions = ElfSectionResolver.resolve(session.data()).unwrap();
    assert!(regions.iter().any(|r| r.length < DEFAULT_WINDOW_SIZE), "expected a short section");

    let results = analyze_regions(&session, &regions, DEFAULT_WINDOW_SIZE, true)
        .expect("analyze elf sections");
    assert_eq!(results.len(), regions.len());
    for (result, region) in results.iter().zip(&regions) {
        let len = result.measurement.as_series().map(|s| s.len());
        assert_eq!(len, Some(region.length.div_ceil(DEFAULT_WINDOW_SIZE)), "{}", region.name);
    }

    let registry = default_resolver_registry();
    let analyzer = RegionAnalyzer { registry: &registry, detector: &ObjectDetector };
    let aggregates = analyzer.entropy(&session, true).expect("elf aggregates");
    assert_eq!(aggregates.resolver, "elf-sections");
    assert_eq!(aggregates.results.len(), regions.len());
}

#[test]
fn macho_resolver_names_sections_by_segment() {
    let mut obj = Object::new(BinaryFormat::MachO, Architecture::X86_64, Endianness::Little);
    let segment = obj.segment_name(StandardSegment::Text).to_vec();
    let text_id = obj.add_section(segment, b"__text".to_vec(), SectionKind::Text);
    obj.section_mut(text_id).append_data(&[0xC3; 32], 1);
    let bytes = obj.write().unwrap();

    assert_eq!(ObjectDetector.detect(&bytes), FileKind::MachO);
    let regions = MachOSectionResolver.resolve(&bytes).expect("resolve macho");
    let text = regions.iter().find(|r| r.name == "__TEXT,__text").expect("__text region");
    assert_eq!(text.length, 32);
    assert!(bytes[text.offset..text.offset + text.length].iter().all(|&b| b == 0xC3));
}

#[test]
fn resolver_parse_failure_is_reported() {
    let err = PeSectionResolver.resolve(b"not a portable executable").unwrap_err();
    match err {
        EntropyError::Resolver { resolver, .. } => assert_eq!(resolver, "pe-sections"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn plain_data_has_no_resolver() {
    let registry = default_resolver_registry();
    let analyzer = RegionAnalyzer { registry: &registry, detector: &ObjectDetector };
    let session = FileSession::from_bytes(vec![0x41; 2048]);
    let err = analyzer.running_entropy(&session, 256, true).unwrap_err();
    assert!(err.is_unsupported(), "unexpected error: {err}");
}

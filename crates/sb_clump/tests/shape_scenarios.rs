use sb_clump::Clump;
use sb_clump::Sequence;
use sb_clump::SequenceRef;
use sb_clump::ShapeError;
use sb_clump::shape::Feature;
use sb_clump::shape::Operator;
use sb_clump::shapes::DOUBLE_STRANDED;
use sb_clump::shapes::GENERIC;
use sb_clump::shapes::LINEAR;
use sb_clump::shapes::LINEAR_DOUBLE;
use sb_clump::shapes::LinearDouble;
use sb_clump::shapes::PCR_TEMPLATE;
use sb_clump::shapes::pcr_template;

#[test]
fn test_pcr_template_features() {
    let inst = pcr_template("attacg").unwrap();
    assert_eq!(inst.shape(), &*PCR_TEMPLATE);
    assert_eq!(inst.sequence_lengths().unwrap(), vec![6, 6]);
    assert_eq!(inst.count_sequences().unwrap(), 2);
    assert_eq!(inst.operate_by_name("count_sequences").unwrap(), Feature::Count(2));
    assert!(matches!(
        inst.operate(Operator::LinearDouble),
        Err(ShapeError::UnknownOperator { shape: "pcr template", .. })
    ));
}

#[test]
fn test_instance_revalidates_before_operating() {
    let mut inst = pcr_template("acg").unwrap();
    inst.cast(&LINEAR_DOUBLE).unwrap();
    assert_eq!(inst.linear_double().unwrap().middle().dump(), "ACG");

    // A new sequence breaks DOUBLE_STRANDED, so LINEAR_DOUBLE too.
    let grown = inst.clump().add_sequence(SequenceRef::new(Sequence::linear_from_str("t").unwrap())).unwrap();
    let broken = LINEAR.examine(grown.clone()).unwrap();
    assert!(broken.is_shape(&GENERIC));
    assert_eq!(broken.count_sequences().unwrap(), 3);
    assert!(matches!(
        DOUBLE_STRANDED.examine(grown),
        Err(ShapeError::Validation { shape: "double stranded", .. })
    ));
}

#[test]
fn test_linear_double_round_trip() {
    let parts = LinearDouble::empty()
        .with_middle(Sequence::linear_from_str("gaattc").unwrap())
        .unwrap()
        .with_overhangs(
            Sequence::linear_from_str("aatt").unwrap(),
            Sequence::linear_from_str("").unwrap(),
            Sequence::linear_from_str("").unwrap(),
            Sequence::linear_from_str("ttaa").unwrap(),
        )
        .unwrap();
    let clump: Clump = parts.to_clump().unwrap();
    let inst = LINEAR_DOUBLE.examine(clump).unwrap();
    assert!(inst.is_shape(&LINEAR));
    assert!(inst.is_shape(&DOUBLE_STRANDED));
    assert!(!inst.is_shape(&PCR_TEMPLATE));
    assert_eq!(inst.linear_double().unwrap(), parts);
    assert_eq!(inst.sequence_lengths().unwrap(), vec![10, 10]);
}

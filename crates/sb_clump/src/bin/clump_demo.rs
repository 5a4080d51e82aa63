use colored::Colorize;
use log::info;

use sb_clump::Clump;
use sb_clump::Sequence;
use sb_clump::SequenceRef;
use sb_clump::shapes::LINEAR_DOUBLE;
use sb_clump::shapes::pcr_template;

fn report(label: &str, clump: &Clump) {
    println!("{}", label.bold());
    println!("{}", clump.dump());
    println!("--");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let a = SequenceRef::new(Sequence::linear_from_str("agctg")?);
    let b = SequenceRef::new(Sequence::circular_from_str("gctca")?);
    info!("circular input gctca stored as {}", b.dump());

    let clump = Clump::new().add_sequence(a.clone())?.add_sequence(b.clone())?;
    report("Two sequences:", &clump);

    let clump = clump.add_annealment(&[a.clone(), b.clone()], &[0, 2], 2)?;
    report("AG ~ CT:", &clump);

    let clump = clump.add_annealment(&[a.clone(), b.clone()], &[2, 4], 3)?;
    report("CTG ~ CAG (wrapping):", &clump);

    match clump.add_annealment(&[a.clone(), b.clone()], &[0, 2], 2) {
        Ok(_) => println!("{}", "overlapping annealment accepted".red()),
        Err(e) => println!("{} {e}", "rejected:".yellow()),
    }

    let clump = clump.remove_sequence(&a)?;
    report("Without the linear strand:", &clump);
    let clump = clump.remove_sequence(&b)?;
    println!("Empty again: {}", clump.is_empty().to_string().green());
    println!("--");

    let template = pcr_template("attacg")?;
    report("PCR template:", template.clump());
    println!("sequence lengths: {:?}", template.sequence_lengths()?);

    let ld = LINEAR_DOUBLE.examine(template.into_clump())?.linear_double()?;
    let sticky = ld.with_overhangs(
        Sequence::linear_from_str("gg")?,
        Sequence::linear_from_str("t")?,
        Sequence::linear_from_str("c")?,
        Sequence::linear_from_str("aaa")?,
    )?;
    println!("{}", "Linear double with overhangs:".bold());
    println!("{sticky}");
    report("as a clump:", &sticky.to_clump()?);

    Ok(())
}

//! `mapforge names` command.

use crate::config::SynthesisConfig;
use crate::naming::{TargetClass, TypePair};
use crate::workspace::fork::mapper_file_suffix;

/// Execute the `names` command.
///
/// # Errors
///
/// Never fails; the signature matches the other commands.
pub fn run(source: &str, target: &str, namespace: Option<&str>) -> Result<(), String> {
    let mut config = SynthesisConfig::default();
    config.apply_overrides(|key| std::env::var(key).ok());
    let pair = TypePair::new(source, TargetClass::new(target, namespace));
    print!("{}", format_names(&pair, &config));
    Ok(())
}

/// Direct and opposite names for `pair`, one per line.
#[must_use]
pub fn format_names(pair: &TypePair, config: &SynthesisConfig) -> String {
    let direct = pair.identity();
    let opposite = pair.opposite_identity();
    format!(
        "direct:   {}\nopposite: {}\nsource:   {}\ntarget:   {}\nfile:     {}\n",
        direct.class_name,
        opposite.class_name,
        pair.source_type_name,
        direct.qualified_target_name,
        mapper_file_suffix(config, &direct.class_name).display()
    )
}

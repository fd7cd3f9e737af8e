//! Command-line value types.

use clap::ValueEnum;
use webpipe_core::Preset;

/// Content preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    Default,
    Picture,
    Photo,
    Drawing,
    Icon,
    Text,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Default => Preset::Default,
            PresetArg::Picture => Preset::Picture,
            PresetArg::Photo => Preset::Photo,
            PresetArg::Drawing => Preset::Drawing,
            PresetArg::Icon => Preset::Icon,
            PresetArg::Text => Preset::Text,
        }
    }
}

//! Binds the behavioural feature files to the step registry.

use crate::fixtures::{CompositionState, PresetState, composition_state, preset_state};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/composition.feature",
    fixtures = [composition_state: CompositionState]
);
scenarios!(
    "tests/features/registry.feature",
    fixtures = [composition_state: CompositionState]
);
scenarios!(
    "tests/features/context.feature",
    fixtures = [composition_state: CompositionState]
);
scenarios!(
    "tests/features/presets.feature",
    fixtures = [preset_state: PresetState]
);

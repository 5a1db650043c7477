//! The closed set of sensing/emission strategies.

use std::fmt;
use std::str::FromStr;

use sd_geometry::Shape;

use crate::{
    BroadcastOutput, DirectInput, DirectOutput, EmitParticleOutput, PeriodicInput,
    PresenceActivationOutput, PresenceOutput, RandomInput, SenseError, SmellInput, StimulusBindings,
    TriggerMode, VisionInput,
};

/// Identifier of a sense kind, with its authoring name.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SenseKind {
    InputDirect,
    InputPeriodic,
    InputRandom,
    InputSmell,
    InputVisionEnter,
    InputVisionStay,
    OutputBroadcast,
    OutputDirect,
    OutputEmitParticle,
    OutputPresence,
    OutputPresenceActivationEnter,
    OutputPresenceActivationStay,
}

impl SenseKind {
    pub const ALL: [SenseKind; 12] = [
        SenseKind::InputDirect,
        SenseKind::InputPeriodic,
        SenseKind::InputRandom,
        SenseKind::InputSmell,
        SenseKind::InputVisionEnter,
        SenseKind::InputVisionStay,
        SenseKind::OutputBroadcast,
        SenseKind::OutputDirect,
        SenseKind::OutputEmitParticle,
        SenseKind::OutputPresence,
        SenseKind::OutputPresenceActivationEnter,
        SenseKind::OutputPresenceActivationStay,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SenseKind::InputDirect => "Input Direct Connection",
            SenseKind::InputPeriodic => "Input Periodic Activation",
            SenseKind::InputRandom => "Input Random Activation",
            SenseKind::InputSmell => "Input Smell",
            SenseKind::InputVisionEnter => "Input Vision Enter",
            SenseKind::InputVisionStay => "Input Vision Stay",
            SenseKind::OutputBroadcast => "Output Broadcast",
            SenseKind::OutputDirect => "Output Direct Connection",
            SenseKind::OutputEmitParticle => "Output Emit Particle",
            SenseKind::OutputPresence => "Output Presence",
            SenseKind::OutputPresenceActivationEnter => "Output Presence Activation Enter",
            SenseKind::OutputPresenceActivationStay => "Output Presence Activation Stay",
        }
    }

    pub fn is_input(self) -> bool {
        matches!(
            self,
            SenseKind::InputDirect
                | SenseKind::InputPeriodic
                | SenseKind::InputRandom
                | SenseKind::InputSmell
                | SenseKind::InputVisionEnter
                | SenseKind::InputVisionStay
        )
    }

    /// Kinds that drive cooperative timer loops.
    pub fn is_timed(self) -> bool {
        matches!(
            self,
            SenseKind::InputPeriodic | SenseKind::InputRandom | SenseKind::OutputEmitParticle
        )
    }
}

impl fmt::Display for SenseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SenseKind {
    type Err = SenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SenseKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| SenseError::UnknownKind(s.to_owned()))
    }
}

// ── Sense ─────────────────────────────────────────────────────────────────────

/// One sensing or emission strategy with its configuration.
#[derive(Debug)]
pub enum Sense {
    DirectInput(DirectInput),
    Periodic(PeriodicInput),
    Random(RandomInput),
    Smell(SmellInput),
    Vision(VisionInput),
    Broadcast(BroadcastOutput),
    DirectOutput(DirectOutput),
    EmitParticle(EmitParticleOutput),
    Presence(PresenceOutput),
    PresenceActivation(PresenceActivationOutput),
}

impl Sense {
    pub fn kind(&self) -> SenseKind {
        match self {
            Sense::DirectInput(_) => SenseKind::InputDirect,
            Sense::Periodic(_) => SenseKind::InputPeriodic,
            Sense::Random(_) => SenseKind::InputRandom,
            Sense::Smell(_) => SenseKind::InputSmell,
            Sense::Vision(v) => match v.mode {
                TriggerMode::Enter => SenseKind::InputVisionEnter,
                TriggerMode::Stay => SenseKind::InputVisionStay,
            },
            Sense::Broadcast(_) => SenseKind::OutputBroadcast,
            Sense::DirectOutput(_) => SenseKind::OutputDirect,
            Sense::EmitParticle(_) => SenseKind::OutputEmitParticle,
            Sense::Presence(_) => SenseKind::OutputPresence,
            Sense::PresenceActivation(p) => match p.mode {
                TriggerMode::Enter => SenseKind::OutputPresenceActivationEnter,
                TriggerMode::Stay => SenseKind::OutputPresenceActivationStay,
            },
        }
    }

    /// A freshly configured sense of `kind` with the authoring defaults.
    pub fn default_for(kind: SenseKind) -> Sense {
        match kind {
            SenseKind::InputDirect => Sense::DirectInput(DirectInput::default()),
            SenseKind::InputPeriodic => Sense::Periodic(PeriodicInput::default()),
            SenseKind::InputRandom => Sense::Random(RandomInput::default()),
            SenseKind::InputSmell => Sense::Smell(SmellInput::default()),
            SenseKind::InputVisionEnter => {
                Sense::Vision(VisionInput::new(TriggerMode::Enter, Shape::default()))
            }
            SenseKind::InputVisionStay => {
                Sense::Vision(VisionInput::new(TriggerMode::Stay, Shape::default()))
            }
            SenseKind::OutputBroadcast => Sense::Broadcast(BroadcastOutput),
            SenseKind::OutputDirect => Sense::DirectOutput(DirectOutput::default()),
            SenseKind::OutputEmitParticle => Sense::EmitParticle(EmitParticleOutput::default()),
            SenseKind::OutputPresence => Sense::Presence(PresenceOutput::default()),
            SenseKind::OutputPresenceActivationEnter => Sense::PresenceActivation(
                PresenceActivationOutput::new(TriggerMode::Enter, "", Shape::default()),
            ),
            SenseKind::OutputPresenceActivationStay => Sense::PresenceActivation(
                PresenceActivationOutput::new(TriggerMode::Stay, "", Shape::default()),
            ),
        }
    }

    /// The detection volume this sense needs, if any.
    pub fn detection_shape(&self) -> Option<Shape> {
        match self {
            Sense::Smell(s) => Some(s.shape()),
            Sense::Vision(v) => Some(v.shape),
            Sense::Presence(p) => Some(p.shape),
            Sense::PresenceActivation(p) => Some(p.shape),
            _ => None,
        }
    }

    /// The single token carried by a presence-style output.
    pub fn single_token(&self) -> Option<&str> {
        match self {
            Sense::Presence(p) => Some(&p.stimulus),
            Sense::PresenceActivation(p) => Some(&p.stimulus),
            _ => None,
        }
    }

    /// Every token this sense listens to or emits, for vocabulary checks.
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            Sense::DirectInput(d) => d.bindings.tokens().iter().map(String::as_str).collect(),
            Sense::Smell(s) => s.bindings.tokens().iter().map(String::as_str).collect(),
            Sense::Vision(v) => v.bindings.tokens().iter().map(String::as_str).collect(),
            Sense::DirectOutput(d) => d.stimuli.iter().map(String::as_str).collect(),
            Sense::EmitParticle(e) => e.stimuli.iter().map(String::as_str).collect(),
            Sense::Presence(p) => vec![p.stimulus.as_str()],
            Sense::PresenceActivation(p) => std::iter::once(p.stimulus.as_str())
                .chain(p.stimulable.iter().map(String::as_str))
                .collect(),
            Sense::Periodic(_) | Sense::Random(_) | Sense::Broadcast(_) => Vec::new(),
        }
    }

    /// Authoring inconsistencies that make part of this sense a no-op.
    pub fn config_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        match self {
            Sense::DirectInput(d) => issues.extend(binding_issue(&d.bindings)),
            Sense::Smell(s) => issues.extend(binding_issue(&s.bindings)),
            Sense::Vision(v) => {
                issues.extend(binding_issue(&v.bindings));
                if v.mode == TriggerMode::Enter && v.exit_handlers.len() < v.bindings.tokens().len() {
                    issues.push(format!(
                        "{} listened tokens but only {} exit handler sets",
                        v.bindings.tokens().len(),
                        v.exit_handlers.len()
                    ));
                }
            }
            Sense::DirectOutput(d) if d.targets.len() != d.stimuli.len() => {
                issues.push(format!(
                    "{} targets but {} tokens",
                    d.targets.len(),
                    d.stimuli.len()
                ));
            }
            Sense::EmitParticle(e) if !e.is_consistent() => {
                issues.push(format!(
                    "{} emitted tokens but {} emission periods",
                    e.stimuli.len(),
                    e.periods_secs.len()
                ));
            }
            _ => {}
        }
        if let Some(shape) = self.detection_shape() {
            if let Err(e) = shape.validate() {
                issues.push(e.to_string());
            }
        }
        issues
    }
}

fn binding_issue(bindings: &StimulusBindings) -> Option<String> {
    (!bindings.is_consistent()).then(|| {
        format!(
            "{} listened tokens but only {} handler sets",
            bindings.tokens().len(),
            bindings.handler_count()
        )
    })
}

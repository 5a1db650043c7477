//! forest — a small predator/prey world for the stimulus engine.
//!
//! A wolf walks toward a herd of deer, leaving a scent trail that drifts
//! downwind.  Deer that smell it alarm the herd, which rebroadcasts the
//! danger: the doe and stag bolt for safe ground while the fawn freezes on
//! the wolf's line.  The wolf sights the fawn and catches it on contact.  Now
//! and then it howls, which alarms the herd as well.
//!
//! ```text
//! forest [config.toml] [trace-dir]
//! ```
//!
//! Set `RUST_LOG=debug` for per-delivery rejections.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sd_core::{EntityId, SimConfig, Tick, Vec3};
use sd_geometry::Shape;
use sd_schedule::Period;
use sd_sense::{
    DirectInput, EmitParticleOutput, HandlerSet, ParticleTemplate, PeriodicInput,
    PresenceActivationOutput, PresenceOutput, RandomInput, Sense, SenseKind, SmellInput,
    StimulusBindings, TriggerMode, VisionInput,
};
use sd_sim::{Delivery, Sim, SimBuilder, SimObserver, TickStats, WorldConfig, load_config};
use sd_trace::{CsvTraceWriter, TraceObserver, TraceWriter};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:                 u64 = 42;
const TICK_DURATION_MS:     u32 = 100;
const TOTAL_TICKS:          u64 = 600; // one simulated minute
const TRACE_INTERVAL_TICKS: u64 = 10;

const WOLF_START:  Vec3 = Vec3::new(-24.0, 0.0, 0.0);
const WOLF_STRIDE: f32  = 1.5; // units per periodic step
// (name, position, flees on danger)
const DEER:        [(&str, Vec3, bool); 3] = [
    ("Doe", Vec3::new(0.0, 0.0, 3.0), true),
    ("Stag", Vec3::new(3.0, 0.0, -3.0), true),
    ("Fawn", Vec3::new(1.0, 0.0, 0.5), false),
];
const SAFE_GROUND: Vec3 = Vec3::new(0.0, 0.0, 40.0);

// ── Counters ──────────────────────────────────────────────────────────────────

#[derive(Default, Clone)]
struct Tally {
    sightings: Arc<AtomicU32>,
    scents:    Arc<AtomicU32>,
    alarms:    Arc<AtomicU32>,
    caught:    Arc<AtomicU32>,
    howls:     Arc<AtomicU32>,
}

fn bump(counter: &Arc<AtomicU32>) -> impl FnMut(&mut sd_sense::Firing<'_>) + Send + 'static {
    let counter = Arc::clone(counter);
    move |_| {
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

fn read(counter: &AtomicU32) -> u32 {
    counter.load(Ordering::Relaxed)
}

// ── World ─────────────────────────────────────────────────────────────────────

fn world_config(path: Option<&Path>) -> Result<WorldConfig> {
    let mut config = match path {
        Some(path) => load_config(path).with_context(|| format!("loading {}", path.display()))?,
        None => WorldConfig {
            sim: SimConfig {
                tick_duration_ms:     TICK_DURATION_MS,
                total_ticks:          TOTAL_TICKS,
                seed:                 SEED,
                trace_interval_ticks: TRACE_INTERVAL_TICKS,
            },
            ..WorldConfig::default()
        },
    };
    config.stimuli.extend(["Danger", "Bite", "Deer", "Wolf scent"].map(String::from));
    Ok(config)
}

fn populate(sim: &mut Sim, tally: &Tally) -> Result<(EntityId, Vec<EntityId>)> {
    let world = &mut sim.world;
    let forest = world.add_system(world.root(), "Forest", "forest")?;
    world.attach_default(forest, SenseKind::OutputBroadcast)?;

    // The herd relays any alarm to every deer.
    let herd = world.add_system(forest, "Herd", "herd")?;
    world.attach_default(herd, SenseKind::OutputBroadcast)?;
    let alarm = StimulusBindings::new().listen("Danger", HandlerSet::from_fn(bump(&tally.alarms)));
    world.attach(herd, Sense::DirectInput(DirectInput::new(alarm).with_rebroadcast(true)))?;

    let mut deer = Vec::with_capacity(DEER.len());
    for (name, position, flees) in DEER {
        let id = world.add_unit(herd, name)?;
        world.set_position(id, position);

        let mut bindings = StimulusBindings::new().listen(
            "Bite",
            HandlerSet::from_fn(bump(&tally.caught)).with(|f| f.despawn(f.entity)),
        );
        if flees {
            bindings = bindings.listen(
                "Danger",
                HandlerSet::from_fn(|f| f.set_position(f.entity, SAFE_GROUND)),
            );
        }
        world.attach(id, Sense::DirectInput(DirectInput::new(bindings)))?;
        world.attach(id, Sense::Presence(PresenceOutput::new("Deer", Shape::sphere(0.6))))?;

        let nose = StimulusBindings::new().listen(
            "Wolf scent",
            HandlerSet::from_fn(bump(&tally.scents)).with(move |f| f.send_direct(herd, "Danger")),
        );
        world.attach(id, Sense::Smell(SmellInput::new(2.5, nose)))?;
        deer.push(id);
    }

    let wolf = world.add_unit(forest, "Wolf")?;
    world.set_position(wolf, WOLF_START);

    let steps = Arc::new(AtomicU32::new(0));
    let stride = HandlerSet::from_fn(move |f| {
        let n = steps.fetch_add(1, Ordering::Relaxed) + 1;
        let x = WOLF_START.x + WOLF_STRIDE * n as f32;
        f.set_position(f.entity, Vec3::new(x, 0.0, 0.0));
    });
    world.attach(wolf, Sense::Periodic(PeriodicInput::new(Period::new(1.0, 0.5), stride)))?;

    let trail = EmitParticleOutput::new()
        .emit("Wolf scent", 0.5)
        .with_radius(0.5)
        .with_template(ParticleTemplate {
            direction: Vec3::new(2.0, 0.0, 0.0), // wind toward the herd
            time_alive_secs: 8.0,
            collider_radius: 0.5,
        });
    world.attach(wolf, Sense::EmitParticle(trail))?;

    let eyes = VisionInput::new(TriggerMode::Enter, Shape::sphere(8.0))
        .listen("Deer", HandlerSet::from_fn(bump(&tally.sightings)));
    world.attach(wolf, Sense::Vision(eyes))?;

    let jaws = PresenceActivationOutput::new(TriggerMode::Enter, "Bite", Shape::sphere(1.0))
        .stimulates("Deer");
    world.attach(wolf, Sense::PresenceActivation(jaws))?;

    let call = HandlerSet::from_fn(bump(&tally.howls)).with(move |f| f.broadcast(forest, "Danger"));
    let howl = RandomInput::new(Period::fixed(10.0), call, 0.05)
        .with_increase(0.05)
        .with_cooldown(10.0);
    world.attach(wolf, Sense::Random(howl))?;

    Ok((wolf, deer))
}

// ── Observer wrapper to count rows ────────────────────────────────────────────

struct CountingObserver<W: TraceWriter> {
    inner:      TraceObserver<W>,
    deliveries: usize,
    last:       Option<TickStats>,
}

impl<W: TraceWriter> CountingObserver<W> {
    fn new(inner: TraceObserver<W>) -> Self {
        Self { inner, deliveries: 0, last: None }
    }
}

impl<W: TraceWriter> SimObserver for CountingObserver<W> {
    fn on_delivery(&mut self, delivery: &Delivery) {
        self.deliveries += 1;
        self.inner.on_delivery(delivery);
    }

    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        self.last = Some(*stats);
        self.inner.on_tick_end(tick, stats);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let trace_dir = args.next().map_or_else(|| PathBuf::from("output/forest"), PathBuf::from);

    // 1. Config and world.
    let config = world_config(config_path.as_deref())?;
    let sim_config = config.sim.clone();
    let mut sim = SimBuilder::new(config).build()?;
    let tally = Tally::default();
    let (wolf, deer) = populate(&mut sim, &tally)?;
    info!(
        entities = sim.world.hierarchy().len(),
        components = sim.world.components().count(),
        ticks = sim_config.total_ticks,
        "forest populated"
    );

    // 2. Trace output.
    let writer = CsvTraceWriter::new(&trace_dir)
        .with_context(|| format!("opening trace directory {}", trace_dir.display()))?;
    let mut obs = CountingObserver::new(TraceObserver::new(writer, &sim_config));

    // 3. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();
    if let Some(e) = obs.inner.take_error() {
        eprintln!("trace error: {e}");
    }

    // 4. Summary.
    println!("Simulation complete in {:.3} s ({})", elapsed.as_secs_f64(), sim.world.clock);
    println!("  deliveries traced : {}", obs.deliveries);
    if let Some(last) = obs.last {
        println!("  particles alive   : {}", last.particles_alive);
    }
    println!("  wolf sightings    : {}", read(&tally.sightings));
    println!("  scents picked up  : {}", read(&tally.scents));
    println!("  herd alarms       : {}", read(&tally.alarms));
    println!("  howls             : {}", read(&tally.howls));
    println!("  deer caught       : {}", read(&tally.caught));
    println!();

    println!("{:<8} {:<8} {:>8} {:>8}", "Entity", "Alive", "x", "z");
    println!("{}", "-".repeat(36));
    for id in std::iter::once(wolf).chain(deer) {
        let name = sim.world.hierarchy().get(id).map_or("-", |e| e.name.as_str());
        match sim.world.hierarchy().position(id) {
            Some(p) => println!("{name:<8} {:<8} {:>8.1} {:>8.1}", "yes", p.x, p.z),
            None => println!("{:<8} {:<8} {:>8} {:>8}", id.0, "no", "-", "-"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use sd_sim::NoopObserver;

    use super::*;

    #[test]
    fn the_chain_plays_out() {
        let mut sim = SimBuilder::new(world_config(None).unwrap()).build().unwrap();
        let tally = Tally::default();
        let (_, deer) = populate(&mut sim, &tally).unwrap();
        sim.run(&mut NoopObserver).unwrap();

        assert!(read(&tally.scents) > 0);
        assert!(read(&tally.alarms) > 0);
        assert!(read(&tally.sightings) > 0);
        assert_eq!(read(&tally.caught), 1);

        let (fawn, doe) = (deer[2], deer[0]);
        assert!(sim.world.hierarchy().get(fawn).is_none());
        assert_eq!(sim.world.hierarchy().position(doe), Some(SAFE_GROUND));
    }
}

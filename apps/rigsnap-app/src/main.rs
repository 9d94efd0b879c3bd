//! rigsnap command-line demo.
//!
//! Provides two modes of operation:
//! - `inspect`: Print a rig description's bone tree and IK constraints
//! - `demo`: Author an FK pose on a chain, then run the snap commands and
//!   print what each one did

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use nalgebra::{Isometry3, Vector3};

use rigsnap_rig::{parse_file, parse_string, Armature, BoneId};
use rigsnap_snap::SnapSession;

// ---------------------------------------------------------------------------
// CLI
// ---------------------------------------------------------------------------

/// FK/IK pose synchronization toolkit.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a rig description's bones and constraints.
    Inspect {
        /// Rig description TOML file.
        rig: PathBuf,
    },

    /// Pose the built-in demo rig and run the snap commands.
    Demo {
        /// Rig description TOML file (defaults to a built-in two-bone arm).
        #[arg(short, long)]
        rig: Option<PathBuf>,

        /// Effector bone to snap (defaults to the first constraint's bone).
        #[arg(short, long)]
        bone: Option<String>,
    },
}

/// Built-in demo rig: a two-bone arm with handle and pole controls.
const DEMO_RIG: &str = r#"
    name = "demo_arm"

    [[bones]]
    name = "upper"
    head = [0.0, 0.0, 0.0]
    tail = [0.0, 1.0, 0.0]

    [[bones]]
    name = "forearm"
    parent = "upper"
    head = [0.0, 1.0, 0.0]
    tail = [1.0, 1.0, 0.0]

    [[bones]]
    name = "hand_ik"
    head = [1.2, 0.8, 0.0]
    tail = [1.2, 1.0, 0.0]

    [[bones]]
    name = "elbow_pole"
    head = [0.5, 0.5, 0.8]
    tail = [0.5, 0.7, 0.8]

    [[constraints]]
    bone = "forearm"
    target = "hand_ik"
    pole = "elbow_pole"
    chain_length = 2
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Inspect { rig } => inspect(&rig),
        Commands::Demo { rig, bone } => demo(rig.as_deref(), bone.as_deref()),
    }
}

// ---------------------------------------------------------------------------
// inspect
// ---------------------------------------------------------------------------

fn inspect(path: &std::path::Path) -> Result<(), Box<dyn Error>> {
    let model = parse_file(path)?;
    let armature = Armature::from_model(&model)?;

    println!("rig '{}': {} bones", model.name, armature.bone_count());
    for i in 0..armature.bone_count() {
        let id = BoneId(i);
        let parent = match armature.parent(id) {
            Some(p) => armature.name(p).to_string(),
            None => "-".to_string(),
        };
        println!(
            "  {:<12} parent={:<12} head={} length={:.3}",
            armature.name(id),
            parent,
            fmt_vec(&armature.head(id)),
            armature.rest_length(id),
        );
    }
    for constraint in armature.constraints() {
        println!(
            "  ik on {}: target={} pole={} chain_length={} influence={:.2} pole_angle={:.4}",
            armature.name(constraint.owner),
            armature.name(constraint.target),
            armature.name(constraint.pole),
            constraint.chain_length,
            constraint.influence,
            constraint.pole_angle,
        );
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// demo
// ---------------------------------------------------------------------------

fn demo(rig: Option<&std::path::Path>, bone: Option<&str>) -> Result<(), Box<dyn Error>> {
    let model = match rig {
        Some(path) => parse_file(path)?,
        None => parse_string(DEMO_RIG)?,
    };
    let mut armature = Armature::from_model(&model)?;

    let effector = match bone {
        Some(name) => armature.bone(name)?,
        None => {
            let Some(constraint) = armature.constraints().first() else {
                return Err("rig has no IK constraint to demo".into());
            };
            constraint.owner
        }
    };
    let chain_length = armature
        .ik_constraint(effector)
        .map(|c| c.chain_length)
        .unwrap_or(2);

    // Author an FK pose: bend every chain bone a little.
    let mut chain = vec![effector];
    chain.extend(armature.ancestors(effector).take(chain_length - 1));
    for (i, &b) in chain.iter().enumerate() {
        let swing = 0.4 + 0.2 * i as f32;
        armature.set_pose_offset(b, Isometry3::rotation(Vector3::z() * swing));
    }
    if let Some(&root) = chain.last() {
        armature.commit_pose_edit(root);
    }

    println!("FK pose authored on '{}':", armature.name(effector));
    print_chain(&armature, &chain);

    let mut session = SnapSession::new(&mut armature, effector)?;
    println!("\n[match ik]   {}", session.match_fk_to_ik());
    println!("[mode]       {}", session.mode());
    println!("\n[match fk]   {}", session.match_ik_to_fk());
    println!("[mode]       {}", session.mode());
    println!("\n[pole loc]   {}", session.adjust_pole_location());
    println!("[pole angle] {}", session.adjust_pole_angle());

    let constraint = armature.ik_constraint(effector).expect("constraint exists");
    println!(
        "\nfinal: influence={:.2} pole_angle={:.4}",
        constraint.influence, constraint.pole_angle
    );
    print_chain(&armature, &chain);
    Ok(())
}

fn print_chain(armature: &Armature, chain: &[BoneId]) {
    for &b in chain {
        println!(
            "  {:<12} head={} tail={}",
            armature.name(b),
            fmt_vec(&armature.head(b)),
            fmt_vec(&armature.tail(b)),
        );
    }
}

fn fmt_vec(v: &Vector3<f32>) -> String {
    format!("({:+.3}, {:+.3}, {:+.3})", v.x, v.y, v.z)
}

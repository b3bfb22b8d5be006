extern crate scene_porter;

use std::env;
use std::process;
use std::str::FromStr;
use nalgebra::Vector3;
use scene_porter::frame_conversion::{FrameConversion, FrameConvention};
use scene_porter::utils::utils_console::{scene_print, PrintColor, PrintMode};
use scene_porter::utils::utils_enums::EnumUtils;
use scene_porter::utils::utils_errors::SceneError;
use scene_porter::utils::utils_se3::ordered_quaternion::{OrderedQuaternion, ScalarOrder};

const USAGE: &str = "usage: convert_pose <source> <target> x y z a b c d [scalar-first|scalar-last]";

fn main () {
    let args: Vec<String> = env::args().collect();
    if let Err(e) = run(&args) {
        scene_print(e.message(), PrintMode::Println, PrintColor::Red, true);
        scene_print(USAGE, PrintMode::Println, PrintColor::None, false);
        scene_print(&format!("conventions: {:?}", EnumUtils::get_all_variant_names_of_enum::<FrameConvention>()), PrintMode::Println, PrintColor::None, false);
        process::exit(1);
    }
}

/// A parsed command line.
#[derive(Clone, Debug, PartialEq)]
struct PoseRequest {
    source: FrameConvention,
    target: FrameConvention,
    position: Vector3<f64>,
    orientation: OrderedQuaternion
}

fn run(args: &[String]) -> Result<(), SceneError> {
    let request = parse_args(args)?;
    let conversion = FrameConversion::new(request.source, request.target);
    let pose = conversion.convert_pose(&request.position, &request.orientation)?;

    scene_print(&format!("{} -> {}", request.source, request.target), PrintMode::Println, PrintColor::Blue, true);
    scene_print(&format!("position: [{}, {}, {}]", pose.position[0], pose.position[1], pose.position[2]), PrintMode::Println, PrintColor::Green, false);
    scene_print(&format!("quaternion ({}): {:?}", pose.orientation.scalar_order(), pose.orientation.components()), PrintMode::Println, PrintColor::Green, false);
    Ok(())
}

fn parse_args(args: &[String]) -> Result<PoseRequest, SceneError> {
    if args.len() != 10 && args.len() != 11 {
        return Err(SceneError::new_generic_error_str(&format!("expected 9 or 10 arguments, got {}.", args.len().saturating_sub(1)), file!(), line!()));
    }

    let source = parse_convention(&args[1])?;
    let target = parse_convention(&args[2])?;
    let mut numbers = vec![];
    for a in &args[3..10] {
        let v = f64::from_str(a).map_err(|_| SceneError::new_generic_error_str(&format!("{:?} is not a number.", a), file!(), line!()))?;
        numbers.push(v);
    }
    // Quaternions default to the source convention's own layout.
    let scalar_order = match args.get(10) {
        Some(s) => { ScalarOrder::from_str(s).map_err(|_| SceneError::new_generic_error_str(&format!("unknown scalar order {:?}.", s), file!(), line!()))? }
        None => { source.scalar_order() }
    };

    Ok(PoseRequest {
        source,
        target,
        position: Vector3::new(numbers[0], numbers[1], numbers[2]),
        orientation: OrderedQuaternion::new([numbers[3], numbers[4], numbers[5], numbers[6]], scalar_order)
    })
}

fn parse_convention(s: &str) -> Result<FrameConvention, SceneError> {
    FrameConvention::from_str(s).map_err(|_| {
        SceneError::new_unsupported_operation_error("parse_convention", &format!("unknown frame convention {:?}.", s), file!(), line!())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &str) -> Vec<String> {
        std::iter::once("convert_pose").chain(s.split_whitespace()).map(|a| a.to_string()).collect()
    }

    #[test]
    fn scalar_order_defaults_to_source_layout() {
        let r = parse_args(&args("unity genesis 1 2 3 0 0 0 1")).unwrap();
        assert_eq!((r.source, r.target), (FrameConvention::UnityYUp, FrameConvention::GenesisZUp));
        assert_eq!(r.position, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(r.orientation, OrderedQuaternion::new_scalar_last(0.0, 0.0, 0.0, 1.0));

        let r = parse_args(&args("replicacad genesis 1 2 3 1 0 0 0")).unwrap();
        assert_eq!(r.orientation.scalar_order(), ScalarOrder::ScalarFirst);
    }

    #[test]
    fn explicit_scalar_order_wins() {
        let r = parse_args(&args("habitat genesis 0 0 0 0 0 0 1 scalar-last")).unwrap();
        assert_eq!(r.orientation.scalar_order(), ScalarOrder::ScalarLast);
        assert_eq!(r.orientation.w(), 1.0);
    }

    #[test]
    fn bad_arguments_are_errors() {
        assert!(parse_args(&args("habitat genesis 1 2 3")).is_err());
        assert!(parse_args(&args("habitat genesis 1 two 3 1 0 0 0")).is_err());
        assert!(matches!(parse_args(&args("mujoco genesis 1 2 3 1 0 0 0")), Err(SceneError::UnsupportedOperationError(_))));
        assert!(parse_args(&args("habitat genesis 1 2 3 1 0 0 0 sideways")).is_err());
    }

    #[test]
    fn run_converts_a_valid_pose() {
        assert!(run(&args("habitat genesis 1 2 3 1 0 0 0")).is_ok());
        assert!(run(&args("habitat genesis 1 2 3 0 0 0 0")).is_err());
    }
}

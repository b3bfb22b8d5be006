pub mod axis_swap;
pub mod euler_axis_order;
pub mod ordered_quaternion;
pub mod quaternion_algebra;

/// Float comparison within an absolute tolerance
pub fn close(a: f32, b: f32, tol: f32) -> bool {
    let d = a - b;
    d < tol && d > -tol
}

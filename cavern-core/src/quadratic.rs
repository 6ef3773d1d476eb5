//
// ──────────────────────────────────────────────────────────────
//   Quadratic solver
//
//   Solves a·x² + b·x + c = 0 over the reals. Roots come back
//   sorted ascending. A zero leading coefficient degrades to the
//   linear equation b·x + c = 0 instead of dividing by zero.
//
//   A discriminant within rounding noise of zero is a double
//   root. Distinct roots use q = -½(b + sign(b)·√d), giving
//   x₁ = q/a and x₂ = c/q, so neither root cancels when b² ≫ 4ac.
// ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Roots
{
  None,
  One(f32),
  Two(f32, f32),
}

impl Roots
{
  pub fn count(&self) -> usize
  {
    match self
    {
      Roots::None => 0,
      Roots::One(_) => 1,
      Roots::Two(..) => 2,
    }
  }

  pub fn is_empty(&self) -> bool
  {
    matches!(self, Roots::None)
  }

  /// Smallest and largest root. Both are the same value for a single root.
  pub fn bounds(&self) -> Option<(f32, f32)>
  {
    match *self
    {
      Roots::None => None,
      Roots::One(x) => Some((x, x)),
      Roots::Two(lo, hi) => Some((lo, hi)),
    }
  }

  pub fn to_vec(&self) -> Vec<f32>
  {
    match *self
    {
      Roots::None => Vec::new(),
      Roots::One(x) => vec![x],
      Roots::Two(lo, hi) => vec![lo, hi],
    }
  }
}

/// Discriminant noise allowance, in units of `f32::EPSILON` times the
/// magnitude of the terms that produced it.
const DISCRIMINANT_ULPS: f32 = 4.0;

pub fn solve_quadratic(a: f32, b: f32, c: f32) -> Roots
{
  let scale = (b * b).max((4.0 * a * c).abs());
  solve_quadratic_within(a, b, c, DISCRIMINANT_ULPS * f32::EPSILON * scale)
}

/// As [`solve_quadratic`], but a discriminant with `|d| <= tolerance` counts
/// as a double root. Callers whose coefficients carry their own rounding
/// error (e.g. `c` formed by cancelling large terms) pass a wider tolerance.
pub fn solve_quadratic_within(a: f32, b: f32, c: f32, tolerance: f32) -> Roots
{
  if a == 0.0
  {
    return solve_linear(b, c);
  }

  let discriminant = b * b - 4.0 * a * c;

  if discriminant.abs() <= tolerance
  {
    return Roots::One(-b / (2.0 * a));
  }

  if discriminant < 0.0
  {
    return Roots::None;
  }

  // signum(0.0) is 1.0, so q stays non-zero here.
  let q = -0.5 * (b + b.signum() * discriminant.sqrt());
  let u = q / a;
  let v = c / q;

  Roots::Two(u.min(v), u.max(v))
}

fn solve_linear(b: f32, c: f32) -> Roots
{
  if b == 0.0
  {
    return Roots::None;
  }

  Roots::One(-c / b)
}

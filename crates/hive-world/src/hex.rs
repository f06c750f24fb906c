//! Axial hex geometry.
//!
//! Directions are indexed 0 to 5 in a fixed order; that index is how move
//! targets are encoded. [`hex_distance`] is the only proximity predicate in
//! the simulation.

use hive_types::HexCoord;

/// The six axial unit offsets, by direction index:
/// `+q`, `+q-r`, `-r`, `-q`, `-q+r`, `+r`.
pub const DIRECTIONS: [HexCoord; 6] = [
    HexCoord::new(1, 0),
    HexCoord::new(1, -1),
    HexCoord::new(0, -1),
    HexCoord::new(-1, 0),
    HexCoord::new(-1, 1),
    HexCoord::new(0, 1),
];

/// Standard axial hex distance:
/// `(|q1-q2| + |q1+r1-q2-r2| + |r1-r2|) / 2`.
pub fn hex_distance(a: HexCoord, b: HexCoord) -> u32 {
    let dq = a.q.abs_diff(b.q);
    let dr = a.r.abs_diff(b.r);
    let ds = a.q.saturating_add(a.r).abs_diff(b.q.saturating_add(b.r));
    dq.saturating_add(dr).saturating_add(ds) / 2
}

/// The coordinate one step from `from` in direction `direction`.
///
/// Returns `None` for a direction outside `0..6` or on coordinate overflow.
pub fn offset(from: HexCoord, direction: usize) -> Option<HexCoord> {
    let delta = DIRECTIONS.get(direction)?;
    Some(HexCoord::new(
        from.q.checked_add(delta.q)?,
        from.r.checked_add(delta.r)?,
    ))
}

/// All six adjacent coordinates with their direction index, whether or not
/// a cell exists there.
pub fn neighbor_coords(from: HexCoord) -> Vec<(usize, HexCoord)> {
    (0..DIRECTIONS.len())
        .filter_map(|dir| offset(from, dir).map(|coord| (dir, coord)))
        .collect()
}

/// Decode a move target into a direction index.
///
/// The leading signed integer of the trimmed target is reduced modulo 6
/// (Euclidean, so negative values wrap). Anything after the digits is
/// ignored, so `"4.0"` and `"3 (left)"` read as 4 and 3. A missing target or
/// one without leading digits means direction 0.
pub fn direction_from_target(target: Option<&str>) -> usize {
    let raw = target.and_then(leading_integer).unwrap_or(0);
    let count = i64::try_from(DIRECTIONS.len()).unwrap_or(6);
    usize::try_from(raw.rem_euclid(count)).unwrap_or(0)
}

/// Parse the optional sign and digits at the start of `text`.
///
/// Values too large for `i64` saturate.
fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, trimmed.get(1..)?),
        Some(b'+') => (false, trimmed.get(1..)?),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }
    let digits = rest.get(..digits_len)?;
    let magnitude = digits.bytes().fold(0_i64, |acc, b| {
        acc.saturating_mul(10)
            .saturating_add(i64::from(b.saturating_sub(b'0')))
    });
    Some(if negative { magnitude.saturating_neg() } else { magnitude })
}

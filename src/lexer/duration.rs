//! Duration literal scanning: `5m`, `1h30m`, `90s`, decomposed into
//! nanoseconds.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::digit1,
    combinator::map_res,
    sequence::pair,
};

const NANOS_PER_MS: i64 = 1_000_000;
const NANOS_PER_SEC: i64 = 1_000 * NANOS_PER_MS;
const NANOS_PER_MIN: i64 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MIN;
const NANOS_PER_DAY: i64 = 24 * NANOS_PER_HOUR;
const NANOS_PER_WEEK: i64 = 7 * NANOS_PER_DAY;
const NANOS_PER_YEAR: i64 = 365 * NANOS_PER_DAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DurationUnit {
    Year,
    Week,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl DurationUnit {
    fn nanos_per_unit(self) -> i64 {
        match self {
            DurationUnit::Year => NANOS_PER_YEAR,
            DurationUnit::Week => NANOS_PER_WEEK,
            DurationUnit::Day => NANOS_PER_DAY,
            DurationUnit::Hour => NANOS_PER_HOUR,
            DurationUnit::Minute => NANOS_PER_MIN,
            DurationUnit::Second => NANOS_PER_SEC,
            DurationUnit::Millisecond => NANOS_PER_MS,
        }
    }

    /// Position in the required descending order; used to reject
    /// out-of-order or repeated units (`1m1h` is invalid).
    fn order(self) -> usize {
        match self {
            DurationUnit::Year => 0,
            DurationUnit::Week => 1,
            DurationUnit::Day => 2,
            DurationUnit::Hour => 3,
            DurationUnit::Minute => 4,
            DurationUnit::Second => 5,
            DurationUnit::Millisecond => 6,
        }
    }
}

fn duration_unit(input: &str) -> IResult<&str, DurationUnit> {
    // "ms" must be tried before "m", or "m" would consume the prefix.
    alt((
        map_res(tag("ms"), |_| Ok::<_, ()>(DurationUnit::Millisecond)),
        map_res(tag("y"), |_| Ok::<_, ()>(DurationUnit::Year)),
        map_res(tag("w"), |_| Ok::<_, ()>(DurationUnit::Week)),
        map_res(tag("d"), |_| Ok::<_, ()>(DurationUnit::Day)),
        map_res(tag("h"), |_| Ok::<_, ()>(DurationUnit::Hour)),
        map_res(tag("m"), |_| Ok::<_, ()>(DurationUnit::Minute)),
        map_res(tag("s"), |_| Ok::<_, ()>(DurationUnit::Second)),
    ))
    .parse(input)
}

fn duration_component(input: &str) -> IResult<&str, (u64, DurationUnit)> {
    pair(map_res(digit1, |s: &str| s.parse::<u64>()), duration_unit).parse(input)
}

/// One or more unit components in strictly descending order
/// (y > w > d > h > m > s > ms); overflow of the nanosecond total is a
/// hard error via checked arithmetic.
pub fn duration_nanos(input: &str) -> IResult<&str, i64> {
    let mut rest = input;
    let mut total: i64 = 0;
    let mut next_allowed = 0usize;
    let mut matched_any = false;

    while let Ok((after, (amount, unit))) = duration_component(rest) {
        if unit.order() < next_allowed {
            break;
        }
        let component_nanos = (amount as i64).checked_mul(unit.nanos_per_unit()).ok_or_else(|| {
            nom::Err::Failure(nom::error::Error::new(input, nom::error::ErrorKind::TooLarge))
        })?;
        total = total.checked_add(component_nanos).ok_or_else(|| {
            nom::Err::Failure(nom::error::Error::new(input, nom::error::ErrorKind::TooLarge))
        })?;
        next_allowed = unit.order() + 1;
        rest = after;
        matched_any = true;
    }

    if !matched_any {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Digit,
        )));
    }
    Ok((rest, total))
}

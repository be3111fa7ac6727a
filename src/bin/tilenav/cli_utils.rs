use bevy::math::Vec2;
use std::path::Path;
use tilenav::errors::{NavError, NavResult};
use tilenav::map::{BlockingItemDef, MapDefinition};

/// Generic parser for delimited strings that return fixed-size arrays
pub fn parse_delimited<T, const N: usize>(
    input: &str,
    delimiter: char,
    type_name: &str,
    parser: impl Fn(&str) -> Option<T>,
) -> NavResult<[T; N]>
where
    T: Copy + Default,
{
    let parts: Vec<&str> = input.split(delimiter).map(str::trim).collect();
    if parts.len() != N {
        return Err(NavError::InvalidMapData {
            reason: format!(
                "Invalid {type_name} format '{input}'. Expected {N} {delimiter}-separated values"
            ),
        });
    }

    let mut result = [T::default(); N];
    for (i, part) in parts.iter().enumerate() {
        result[i] = parser(part).ok_or_else(|| NavError::InvalidMapData {
            reason: format!("Invalid {type_name} value: '{part}'"),
        })?;
    }

    Ok(result)
}

/// Parse position string "X,Y"
pub fn parse_position(pos_str: &str) -> NavResult<Vec2> {
    let [x, y] = parse_delimited::<f32, 2>(pos_str, ',', "position", |s| s.parse().ok())?;
    Ok(Vec2::new(x, y))
}

/// Parse blocking item string "X,Y,TOKEN"
pub fn parse_blocking_item(item_str: &str) -> NavResult<BlockingItemDef> {
    let mut parts = item_str.splitn(3, ',').map(str::trim);
    let (Some(x), Some(y), Some(token)) = (parts.next(), parts.next(), parts.next()) else {
        return Err(NavError::InvalidMapData {
            reason: format!("Invalid blocking item '{item_str}'. Expected X,Y,TOKEN"),
        });
    };

    let [x, y] = parse_delimited::<i32, 2>(&format!("{x},{y}"), ',', "cell", |s| s.parse().ok())?;
    if token.is_empty() {
        return Err(NavError::InvalidMapData {
            reason: "Blocking item token must not be empty".to_string(),
        });
    }

    Ok(BlockingItemDef {
        x,
        y,
        token: token.to_string(),
    })
}

/// TOML maps load from any path; anything else is a binary map in the maps directory
pub fn load_map(map: &str) -> NavResult<MapDefinition> {
    let is_toml = Path::new(map)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        MapDefinition::load_toml(map)
    } else {
        MapDefinition::load_from_file(map)
    }
}

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Stockpiled goods. Balances live in the resource ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Wood,
    Food,
    Metals,
}

impl Resource {
    pub const ALL: [Resource; 3] = [Resource::Wood, Resource::Food, Resource::Metals];

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Wood => "wood",
            Resource::Food => "food",
            Resource::Metals => "metals",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Building {
    Home,
    Houses,
    Tenements,
    Farms,
    Mines,
    Factories,
}

impl Building {
    pub const ALL: [Building; 6] = [
        Building::Home,
        Building::Houses,
        Building::Tenements,
        Building::Farms,
        Building::Mines,
        Building::Factories,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Building::Home => "home",
            Building::Houses => "houses",
            Building::Tenements => "tenements",
            Building::Farms => "farms",
            Building::Mines => "mines",
            Building::Factories => "factories",
        }
    }

    pub fn source(self) -> Source {
        match self {
            Building::Home => Source::Home,
            Building::Houses => Source::Houses,
            Building::Tenements => Source::Tenements,
            Building::Farms => Source::Farms,
            Building::Mines => Source::Mines,
            Building::Factories => Source::Factories,
        }
    }

    /// The feature flag that hides this building from read-side consumers, if any.
    pub fn lock(self) -> Option<Feature> {
        match self {
            Building::Mines => Some(Feature::Mines),
            Building::Tenements => Some(Feature::Tenements),
            Building::Factories => Some(Feature::Factories),
            Building::Home | Building::Houses | Building::Farms => None,
        }
    }
}

/// Feature flags flipped by unlock transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Mines,
    Tenements,
    Factories,
    Metals,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::Mines,
        Feature::Tenements,
        Feature::Factories,
        Feature::Metals,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Feature::Mines => "mines",
            Feature::Tenements => "tenements",
            Feature::Factories => "factories",
            Feature::Metals => "metals",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PopulationKind {
    Civilians,
    Lumberjacks,
    Miners,
    Builders,
    Farmers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    Empty,
    Forests,
    Water,
    Mines,
    Home,
    Farms,
    Outposts,
    Unexplored,
}

impl TileKind {
    /// Production source an explored tile of this kind feeds, if any.
    pub fn source(self) -> Option<Source> {
        match self {
            TileKind::Empty => Some(Source::Empty),
            TileKind::Forests => Some(Source::Forests),
            TileKind::Water => Some(Source::Water),
            TileKind::Mines => Some(Source::Mines),
            TileKind::Home => Some(Source::Home),
            TileKind::Farms => Some(Source::Farms),
            TileKind::Outposts => Some(Source::Outposts),
            TileKind::Unexplored => None,
        }
    }
}

/// Key into the multiplier and production tables. Tiles and buildings share
/// one namespace, so a `mines` tile and a `mines` building produce alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Home,
    Empty,
    Forests,
    Water,
    Mines,
    Farms,
    Outposts,
    Houses,
    Tenements,
    Factories,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Building {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something that can be bought: an entity type carrying its entity name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "name", rename_all = "lowercase")]
pub enum Item {
    Building(Building),
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Building(building) => write!(f, "building/{building}"),
        }
    }
}

/// A resource vector: what something costs, or what is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cost(BTreeMap<Resource, f64>);

impl Cost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, resource: Resource, amount: f64) -> Self {
        self.0.insert(resource, amount);
        self
    }

    /// `{food: 0, wood: 0, metals: 0}`.
    pub fn zero() -> Self {
        Resource::ALL
            .iter()
            .fold(Self::new(), |cost, resource| cost.with(*resource, 0.0))
    }

    pub fn get(&self, resource: Resource) -> f64 {
        self.0.get(&resource).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Resource, f64)> + '_ {
        self.0.iter().map(|(resource, amount)| (*resource, *amount))
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self(
            self.0
                .iter()
                .map(|(resource, amount)| (*resource, amount * factor))
                .collect(),
        )
    }

    pub fn is_zero(&self) -> bool {
        self.0.values().all(|amount| *amount == 0.0)
    }
}

impl FromIterator<(Resource, f64)> for Cost {
    fn from_iter<T: IntoIterator<Item = (Resource, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (resource, amount) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{resource}: {amount:.2}")?;
            first = false;
        }
        Ok(())
    }
}

/// One cell of the world grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub id: String,
    pub kind: TileKind,
    pub cost: Cost,
    pub explored: bool,
}

impl Tile {
    pub fn new(row: usize, col: usize, kind: TileKind, cost: Cost) -> Self {
        Self {
            id: tile_id(row, col),
            kind,
            cost,
            explored: false,
        }
    }
}

pub fn tile_id(row: usize, col: usize) -> String {
    format!("{row}-{col}")
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element classes
//!
//! Fast class checking using an enum instead of string comparison.

use std::fmt;

/// Element classes
/// Common classes of a mechanical/architectural model for fast pattern matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementClass {
    // Spatial containers
    Project,
    Site,
    Building,
    BuildingStorey,
    Space,

    // Structural elements
    Wall,
    Slab,
    Beam,
    Column,
    Plate,
    Member,
    Covering,

    // Openings
    Door,
    Window,

    // MEP
    DuctSegment,
    DuctFitting,
    PipeSegment,
    PipeFitting,
    FlowSegment,
    FlowFitting,
    FlowTerminal,
    FlowController,

    // Other common classes
    FurnishingElement,
    BuildingElementProxy,

    // Fallback for unknown classes
    Unknown(u16), // Store hash for unknown classes
}

impl ElementClass {
    /// Parse class from an entity type name (case-insensitive, `IFC` prefix optional)
    pub fn from_name(name: &str) -> Self {
        let upper = name.to_ascii_uppercase();
        let stripped = upper.strip_prefix("IFC").unwrap_or(&upper);

        match stripped {
            "PROJECT" => Self::Project,
            "SITE" => Self::Site,
            "BUILDING" => Self::Building,
            "BUILDINGSTOREY" => Self::BuildingStorey,
            "SPACE" => Self::Space,

            "WALL" | "WALLSTANDARDCASE" => Self::Wall,
            "SLAB" => Self::Slab,
            "BEAM" => Self::Beam,
            "COLUMN" => Self::Column,
            "PLATE" => Self::Plate,
            "MEMBER" => Self::Member,
            "COVERING" => Self::Covering,

            "DOOR" => Self::Door,
            "WINDOW" => Self::Window,

            "DUCTSEGMENT" => Self::DuctSegment,
            "DUCTFITTING" => Self::DuctFitting,
            "PIPESEGMENT" => Self::PipeSegment,
            "PIPEFITTING" => Self::PipeFitting,
            "FLOWSEGMENT" => Self::FlowSegment,
            "FLOWFITTING" => Self::FlowFitting,
            "FLOWTERMINAL" => Self::FlowTerminal,
            "FLOWCONTROLLER" => Self::FlowController,

            "FURNISHINGELEMENT" => Self::FurnishingElement,
            "BUILDINGELEMENTPROXY" => Self::BuildingElementProxy,

            _ => {
                // Unknown class - store a hash
                Self::Unknown(simple_hash(stripped))
            }
        }
    }

    /// Get string representation
    pub fn name(&self) -> &'static str {
        match self {
            Self::Project => "IFCPROJECT",
            Self::Site => "IFCSITE",
            Self::Building => "IFCBUILDING",
            Self::BuildingStorey => "IFCBUILDINGSTOREY",
            Self::Space => "IFCSPACE",

            Self::Wall => "IFCWALL",
            Self::Slab => "IFCSLAB",
            Self::Beam => "IFCBEAM",
            Self::Column => "IFCCOLUMN",
            Self::Plate => "IFCPLATE",
            Self::Member => "IFCMEMBER",
            Self::Covering => "IFCCOVERING",

            Self::Door => "IFCDOOR",
            Self::Window => "IFCWINDOW",

            Self::DuctSegment => "IFCDUCTSEGMENT",
            Self::DuctFitting => "IFCDUCTFITTING",
            Self::PipeSegment => "IFCPIPESEGMENT",
            Self::PipeFitting => "IFCPIPEFITTING",
            Self::FlowSegment => "IFCFLOWSEGMENT",
            Self::FlowFitting => "IFCFLOWFITTING",
            Self::FlowTerminal => "IFCFLOWTERMINAL",
            Self::FlowController => "IFCFLOWCONTROLLER",

            Self::FurnishingElement => "IFCFURNISHINGELEMENT",
            Self::BuildingElementProxy => "IFCBUILDINGELEMENTPROXY",

            Self::Unknown(_) => "UNKNOWN",
        }
    }

    /// Check if this is a spatial container (project/site/building/storey/space)
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Project | Self::Site | Self::Building | Self::BuildingStorey | Self::Space
        )
    }
}

impl fmt::Display for ElementClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Simple hash function for unknown class names
fn simple_hash(s: &str) -> u16 {
    let mut hash: u32 = 5381;
    for byte in s.bytes() {
        hash = ((hash << 5).wrapping_add(hash)).wrapping_add(byte as u32);
    }
    (hash & 0xFFFF) as u16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(
            ElementClass::from_name("IfcDuctSegment"),
            ElementClass::DuctSegment
        );
        assert_eq!(ElementClass::from_name("IFCWALL"), ElementClass::Wall);
        assert_eq!(ElementClass::from_name("PipeSegment"), ElementClass::PipeSegment);
    }

    #[test]
    fn test_wall_standard_case_folds_to_wall() {
        assert_eq!(
            ElementClass::from_name("IfcWallStandardCase"),
            ElementClass::Wall
        );
    }

    #[test]
    fn test_is_container() {
        assert!(ElementClass::Project.is_container());
        assert!(ElementClass::BuildingStorey.is_container());
        assert!(!ElementClass::DuctSegment.is_container());
        assert!(!ElementClass::Wall.is_container());
    }

    #[test]
    fn test_unknown_class() {
        let unknown = ElementClass::from_name("IfcSensorType");
        assert!(matches!(unknown, ElementClass::Unknown(_)));
        // Same name hashes to the same class
        assert_eq!(unknown, ElementClass::from_name("IFCSENSORTYPE"));
    }
}

use serde::Serialize;

/// Static profile for one of the municipality's 13 barangays. This data
/// changes roughly once per election cycle, so it ships with the binary
/// rather than living in the database.
#[derive(Debug, Clone, Serialize)]
pub struct Barangay {
    pub name: &'static str,
    pub slug: &'static str,
    pub captain: &'static str,
    pub population: u32,
    pub land_area_hectares: f64,
    pub contact_number: &'static str,
}

pub fn all_barangays() -> &'static [Barangay] {
    &BARANGAYS
}

pub fn find_barangay(slug: &str) -> Option<&'static Barangay> {
    BARANGAYS.iter().find(|b| b.slug == slug)
}

static BARANGAYS: [Barangay; 13] = [
    Barangay {
        name: "Poblacion",
        slug: "poblacion",
        captain: "Rodrigo Santos",
        population: 8214,
        land_area_hectares: 212.5,
        contact_number: "(043) 555-0101",
    },
    Barangay {
        name: "Bagong Silang",
        slug: "bagong-silang",
        captain: "Teresita Ramos",
        population: 5632,
        land_area_hectares: 340.0,
        contact_number: "(043) 555-0102",
    },
    Barangay {
        name: "San Isidro",
        slug: "san-isidro",
        captain: "Ernesto Villanueva",
        population: 4921,
        land_area_hectares: 505.2,
        contact_number: "(043) 555-0103",
    },
    Barangay {
        name: "Santa Cruz",
        slug: "santa-cruz",
        captain: "Lourdes Mendoza",
        population: 6108,
        land_area_hectares: 287.9,
        contact_number: "(043) 555-0104",
    },
    Barangay {
        name: "San Jose",
        slug: "san-jose",
        captain: "Armando dela Cruz",
        population: 3754,
        land_area_hectares: 612.4,
        contact_number: "(043) 555-0105",
    },
    Barangay {
        name: "Malinta",
        slug: "malinta",
        captain: "Corazon Aquino-Reyes",
        population: 2987,
        land_area_hectares: 423.1,
        contact_number: "(043) 555-0106",
    },
    Barangay {
        name: "Maligaya",
        slug: "maligaya",
        captain: "Felipe Bautista",
        population: 3412,
        land_area_hectares: 198.6,
        contact_number: "(043) 555-0107",
    },
    Barangay {
        name: "Santo Niño",
        slug: "santo-nino",
        captain: "Gregoria Pascual",
        population: 445,
        land_area_hectares: 156.3,
        contact_number: "(043) 555-0108",
    },
    Barangay {
        name: "Bagumbayan",
        slug: "bagumbayan",
        captain: "Isagani Torres",
        population: 5120,
        land_area_hectares: 378.8,
        contact_number: "(043) 555-0109",
    },
    Barangay {
        name: "Mabini",
        slug: "mabini",
        captain: "Rosario Lim",
        population: 2659,
        land_area_hectares: 534.7,
        contact_number: "(043) 555-0110",
    },
    Barangay {
        name: "Rizal",
        slug: "rizal",
        captain: "Domingo Garcia",
        population: 3891,
        land_area_hectares: 445.0,
        contact_number: "(043) 555-0111",
    },
    Barangay {
        name: "San Roque",
        slug: "san-roque",
        captain: "Evangeline Cruz",
        population: 4377,
        land_area_hectares: 301.2,
        contact_number: "(043) 555-0112",
    },
    Barangay {
        name: "Concepcion",
        slug: "concepcion",
        captain: "Benigno Salazar",
        population: 3025,
        land_area_hectares: 489.5,
        contact_number: "(043) 555-0113",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirteen_barangays() {
        assert_eq!(all_barangays().len(), 13);
    }

    #[test]
    fn test_slugs_unique() {
        let mut slugs: Vec<_> = all_barangays().iter().map(|b| b.slug).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), 13);
    }

    #[test]
    fn test_find_by_slug() {
        assert_eq!(find_barangay("poblacion").unwrap().name, "Poblacion");
        assert!(find_barangay("nowhere").is_none());
    }
}

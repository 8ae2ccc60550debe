//! Static lookup tables shared by the source adapters and the recommendation
//! generator. Built once at startup and only ever read afterwards.

use std::collections::HashMap;

/// Display name and grouping for a CDC PLACES measure id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureInfo {
    pub name: &'static str,
    pub category: &'static str,
}

/// One FEMA National Risk Index hazard type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HazardDefinition {
    /// Field prefix in the NRI feature service (`{code}_RISKS`, `{code}_RISKR`).
    pub code: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub preparedness: &'static str,
}

#[derive(Debug, Clone)]
pub struct ReferenceTables {
    national_averages: HashMap<&'static str, f64>,
    measures: HashMap<&'static str, MeasureInfo>,
    contaminants: HashMap<&'static str, &'static str>,
    violation_types: HashMap<&'static str, &'static str>,
    hazards: Vec<HazardDefinition>,
}

// Approximate CDC PLACES 2023 national crude prevalence (%).
const NATIONAL_AVERAGES: &[(&str, f64)] = &[
    ("ARTHRITIS", 24.2),
    ("BPHIGH", 32.4),
    ("CANCER", 6.2),
    ("CASTHMA", 9.8),
    ("CHD", 5.8),
    ("COPD", 6.5),
    ("CSMOKING", 14.1),
    ("DEPRESSION", 20.5),
    ("DIABETES", 11.3),
    ("HIGHCHOL", 30.3),
    ("KIDNEY", 3.0),
    ("OBESITY", 32.4),
    ("SLEEP", 34.4),
    ("STROKE", 3.4),
    ("TEETHLOST", 12.4),
];

const MEASURES: &[(&str, &str, &str)] = &[
    ("ARTHRITIS", "Arthritis", "Chronic Disease"),
    ("BPHIGH", "High Blood Pressure", "Cardiovascular"),
    ("CANCER", "Cancer (excl. skin)", "Chronic Disease"),
    ("CASTHMA", "Current Asthma", "Respiratory"),
    ("CHD", "Coronary Heart Disease", "Cardiovascular"),
    ("COPD", "COPD", "Respiratory"),
    ("CSMOKING", "Current Smoking", "Risk Behavior"),
    ("DEPRESSION", "Depression", "Mental Health"),
    ("DIABETES", "Diabetes", "Chronic Disease"),
    ("HIGHCHOL", "High Cholesterol", "Cardiovascular"),
    ("KIDNEY", "Chronic Kidney Disease", "Chronic Disease"),
    ("OBESITY", "Obesity", "Risk Behavior"),
    ("SLEEP", "Sleeping <7 Hours", "Risk Behavior"),
    ("STROKE", "Stroke", "Cardiovascular"),
    ("TEETHLOST", "All Teeth Lost (65+)", "Other"),
    ("BINGE", "Binge Drinking", "Risk Behavior"),
    ("LPA", "Physical Inactivity", "Risk Behavior"),
    ("ACCESS2", "Lack of Health Insurance", "Prevention"),
    ("BPMED", "BP Medication Adherence", "Prevention"),
    ("CERVICAL", "Cervical Cancer Screening", "Prevention"),
    ("CHECKUP", "Annual Checkup", "Prevention"),
    ("CHOLSCREEN", "Cholesterol Screening", "Prevention"),
    ("COLON_SCREEN", "Colorectal Cancer Screening", "Prevention"),
    ("DENTAL", "Dental Visit", "Prevention"),
    ("MAMMOUSE", "Mammography Use", "Prevention"),
    ("MHLTH", "Poor Mental Health (14+ days)", "Mental Health"),
    ("PHLTH", "Poor Physical Health (14+ days)", "Health Outcomes"),
    ("GHLTH", "Poor General Health", "Health Outcomes"),
    ("HEARING", "Hearing Disability", "Disability"),
    ("VISION", "Vision Disability", "Disability"),
    ("COGNITION", "Cognitive Disability", "Disability"),
    ("MOBILITY", "Mobility Disability", "Disability"),
    ("SELFCARE", "Self-Care Disability", "Disability"),
    ("INDEPLIVE", "Independent Living Disability", "Disability"),
    ("DISABILITY", "Any Disability", "Disability"),
];

const CONTAMINANTS: &[(&str, &str)] = &[
    ("1005", "Barium"),
    ("1010", "Cadmium"),
    ("1015", "Chromium"),
    ("1020", "Fluoride"),
    ("1024", "Cyanide"),
    ("1025", "Mercury"),
    ("1030", "Nitrate"),
    ("1035", "Selenium"),
    ("1036", "Nickel"),
    ("1038", "Uranium"),
    ("1040", "Lead"),
    ("1041", "Copper"),
    ("1074", "Antimony"),
    ("1075", "Beryllium"),
    ("1085", "Thallium"),
    ("2039", "Atrazine"),
    ("2050", "Lindane"),
    ("2065", "Simazine"),
    ("2105", "2,4-D"),
    ("2378", "Glyphosate"),
    ("2950", "TTHM (Total Trihalomethanes)"),
    ("2456", "HAA5 (Haloacetic Acids)"),
    ("3000", "Coliform (TCR)"),
    ("3014", "E. coli"),
    ("3100", "Turbidity"),
    ("4000", "Gross Alpha"),
    ("4006", "Uranium"),
    ("4010", "Radium-226"),
    ("4020", "Radium-228"),
    ("4100", "Gross Beta"),
    ("5000", "No contaminant (reporting violation)"),
];

const VIOLATION_TYPES: &[(&str, &str)] = &[
    ("MCL", "Max Contaminant Level"),
    ("MR", "Monitoring & Reporting"),
    ("TT", "Treatment Technique"),
    ("MON", "Monitoring"),
    ("RPT", "Reporting"),
    ("Other", "Other"),
];

const HAZARDS: &[HazardDefinition] = &[
    HazardDefinition {
        code: "ERQK",
        name: "Earthquake",
        icon: "🌍",
        preparedness: "Secure heavy furniture and water heaters to walls",
    },
    HazardDefinition {
        code: "RFLD",
        name: "Riverine Flooding",
        icon: "🌊",
        preparedness: "Check if you're in a FEMA flood zone (floodsmart.gov)",
    },
    HazardDefinition {
        code: "IFLD",
        name: "Inland Flooding",
        icon: "🌧️",
        preparedness: "Don't drive through flooded roads: Turn Around, Don't Drown",
    },
    HazardDefinition {
        code: "HRCN",
        name: "Hurricane",
        icon: "🌀",
        preparedness: "Have a hurricane plan with evacuation route identified",
    },
    HazardDefinition {
        code: "TRND",
        name: "Tornado",
        icon: "🌪️",
        preparedness: "Identify a safe room: interior room on the lowest floor, away from windows",
    },
    HazardDefinition {
        code: "WFIR",
        name: "Wildfire",
        icon: "🔥",
        preparedness: "Create defensible space: clear vegetation 30+ feet from your home",
    },
    HazardDefinition {
        code: "WNTW",
        name: "Winter Weather",
        icon: "❄️",
        preparedness: "Winterize your home: insulate pipes, check heating system",
    },
    HazardDefinition {
        code: "HAIL",
        name: "Hail",
        icon: "🧊",
        preparedness: "Move vehicles under cover when severe storms approach",
    },
    HazardDefinition {
        code: "HWAV",
        name: "Heat Wave",
        icon: "🌡️",
        preparedness: "Stay hydrated: drink water before you feel thirsty",
    },
    HazardDefinition {
        code: "SWND",
        name: "Strong Wind",
        icon: "💨",
        preparedness: "Secure outdoor furniture, trampolines, and loose items",
    },
    HazardDefinition {
        code: "LTNG",
        name: "Lightning",
        icon: "⚡",
        preparedness: "When Thunder Roars, Go Indoors: seek shelter immediately",
    },
    HazardDefinition {
        code: "DRGT",
        name: "Drought",
        icon: "☀️",
        preparedness: "Practice water conservation habits",
    },
    HazardDefinition {
        code: "CFLD",
        name: "Coastal Flooding",
        icon: "🏖️",
        preparedness: "Know your flood zone and get flood insurance",
    },
];

impl ReferenceTables {
    /// Tables as published by CDC PLACES, EPA SDWIS, and FEMA NRI.
    pub fn standard() -> Self {
        Self {
            national_averages: NATIONAL_AVERAGES.iter().copied().collect(),
            measures: MEASURES
                .iter()
                .map(|&(id, name, category)| (id, MeasureInfo { name, category }))
                .collect(),
            contaminants: CONTAMINANTS.iter().copied().collect(),
            violation_types: VIOLATION_TYPES.iter().copied().collect(),
            hazards: HAZARDS.to_vec(),
        }
    }

    pub fn national_average(&self, measure_id: &str) -> Option<f64> {
        self.national_averages.get(measure_id).copied()
    }

    pub fn measure(&self, measure_id: &str) -> Option<MeasureInfo> {
        self.measures.get(measure_id).copied()
    }

    pub fn contaminant_name(&self, code: &str) -> String {
        self.contaminants
            .get(code)
            .map(|name| (*name).to_string())
            .unwrap_or_else(|| format!("Contaminant {code}"))
    }

    pub fn violation_type(&self, category_code: &str) -> String {
        match self.violation_types.get(category_code) {
            Some(name) => (*name).to_string(),
            None if category_code.is_empty() => "Unknown".to_string(),
            None => category_code.to_string(),
        }
    }

    pub fn hazards(&self) -> &[HazardDefinition] {
        &self.hazards
    }

    pub fn hazard(&self, name: &str) -> Option<&HazardDefinition> {
        self.hazards.iter().find(|hazard| hazard.name == name)
    }

    /// Collapses PLACES API category names onto the report's groupings.
    pub fn measure_category(api_category: &str) -> String {
        match api_category {
            "Health Outcomes" | "Health Status" => "Health Outcomes".to_string(),
            "Health Risk Behaviors" => "Risk Behavior".to_string(),
            "Prevention" => "Prevention".to_string(),
            "Disability" => "Disability".to_string(),
            "" => "Other".to_string(),
            other => other.to_string(),
        }
    }
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_fall_back_for_unknown_codes() {
        let tables = ReferenceTables::standard();
        assert_eq!(tables.contaminant_name("1040"), "Lead");
        assert_eq!(tables.contaminant_name("9999"), "Contaminant 9999");
        assert_eq!(tables.violation_type("MCL"), "Max Contaminant Level");
        assert_eq!(tables.violation_type("XYZ"), "XYZ");
        assert_eq!(tables.violation_type(""), "Unknown");
    }

    #[test]
    fn baselines_only_exist_for_published_measures() {
        let tables = ReferenceTables::standard();
        assert_eq!(tables.national_average("DIABETES"), Some(11.3));
        assert_eq!(tables.national_average("BINGE"), None);
        assert_eq!(
            tables.measure("BINGE").map(|info| info.category),
            Some("Risk Behavior")
        );
    }

    #[test]
    fn hazard_catalog_covers_nri_fields() {
        let tables = ReferenceTables::standard();
        assert_eq!(tables.hazards().len(), 13);
        let tornado = tables.hazard("Tornado").expect("tornado listed");
        assert_eq!(tornado.code, "TRND");
    }
}

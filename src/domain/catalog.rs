//! Fixed vocabularies the model must choose from.

pub const TRANSACTION_CATEGORIES: &[&str] = &[
    "Rechargement par carte",
    "Compte courant rémunéré",
    "Virements",
    "Paiements",
    "Prélèvements",
    "Investissement Sumeria",
    "Prêts Sumeria",
    "Livret d'épargne",
    "Gains Sumeria",
    "Dons",
    "Cartes cadeaux",
    "Retraits distributeurs",
    "Frais",
    "Lydia avec mes contacts",
];

pub const TRANSACTION_TYPES: &[&str] = &["Entrées d'argent", "Sorties d'argent", "Inter-comptes"];

pub const MOVEMENT_TYPES: &[&str] = &["inflow", "outflow", "internal_transfer"];

pub const MOVEMENT_SCOPES: &[&str] = &["personal", "contacts", "merchants", "own_accounts"];

pub const PFM_CATEGORIES: &[&str] = &[
    "atm",
    "auto_insurance",
    "bakeries",
    "neutral_for_information",
    "benefits",
    "betting",
    "bio_markets",
    "cafes_bars",
    "car_rental",
    "car_wash_repair",
    "children_care",
    "clothing",
    "commodities",
    "commuting",
    "credit_conso",
    "cosmetics",
    "opera_theatre_concerts_standup_museum_cinema",
    "dating",
    "debt_collection",
    "diy",
    "education_degrees",
    "electronics_it_stores",
    "entertainment",
    "fintechs",
    "fintechs_suspicious",
    "food_delivery",
    "food_retail",
    "18_plus",
    "furniture",
    "gaming",
    "gifts",
    "give",
    "hairdresser",
    "hard_bank_fees",
    "hardest_bank_fees",
    "health_insurance",
    "insurance",
    "internal",
    "jewelry",
    "laundromat_pressing",
    "leasing",
    "legal_finance",
    "loans",
    "marketplace",
    "medical",
    "misc",
    "multimedia",
    "newspapers_magasines",
    "new_means_of_transportation",
    "online_courses",
    "optical_hearing",
    "other_income",
    "other_passive_activities",
    "others_housing",
    "parking",
    "pet_stuff",
    "pharmacies",
    "phone_internet_plan",
    "photography_art",
    "playful_culture",
    "prepaid_cards",
    "professional_expenses",
    "refund",
    "rent",
    "restaurants",
    "retro_bank_fees",
    "salary_revenues",
    "savings_investments",
    "security",
    "self_care",
    "mailing_printing_delivery",
    "shopping_center",
    "snacking",
    "soft_bank_fees",
    "software",
    "sports_activities",
    "sports_equipment",
    "supermarkets",
    "tabac_presse",
    "taxes",
    "taxis",
    "tolls_gas_stations",
    "trading",
    "travel_accomodation",
    "travelling_platforms",
    "travel_means",
    "uncategorizable",
    "vpns",
    "transportation",
    "online_content",
    "groceries",
    "restaurants_bars_cafes",
];

pub fn is_known_pfm_category(tag: &str) -> bool {
    PFM_CATEGORIES.contains(&tag)
}

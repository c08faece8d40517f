//! Static recategorization tables for listings.
//!
//! Both tables are built once on first use and handed out by reference.

use super::{LookupTable, OrderedCategory};
use once_cell::sync::Lazy;

/// Tier for host locations the hierarchy does not know.
pub const UNKNOWN_LOCATION: &str = "Unknown";

/// Class for property descriptions the table does not know.
pub const OTHER_PROPERTY: &str = "Other";

/// Location tiers from most local to most distant, then [`UNKNOWN_LOCATION`].
pub const LOCATION_TIERS: [&str; 7] = [
    "Milan",
    "Lombardy",
    "Northern Italy",
    "Central/Southern Italy",
    "Europe",
    "Extra-EU",
    UNKNOWN_LOCATION,
];

pub const PROPERTY_CLASSES: [&str; 6] = [
    "Apartment/Condo",
    "House",
    "Guest/Hotel",
    "Unique",
    "Ambiguous",
    OTHER_PROPERTY,
];

/// Host location (region or country) -> tier.
pub const LOCATION_HIERARCHY: &[(&str, &str)] = &[
    ("Milan", "Milan"),
    ("Lombardy", "Lombardy"),
    // macro-regional
    ("Piedmont", "Northern Italy"),
    ("Liguria", "Northern Italy"),
    ("Veneto", "Northern Italy"),
    ("Friuli-Venezia Giulia", "Northern Italy"),
    ("Trentino-Alto Adige", "Northern Italy"),
    ("Valle d'Aosta", "Northern Italy"),
    ("Aosta Valley", "Northern Italy"),
    ("Emilia-Romagna", "Northern Italy"),
    ("Lazio", "Central/Southern Italy"),
    ("Tuscany", "Central/Southern Italy"),
    ("Campania", "Central/Southern Italy"),
    ("Sicily", "Central/Southern Italy"),
    ("Apulia", "Central/Southern Italy"),
    ("Calabria", "Central/Southern Italy"),
    ("Marche", "Central/Southern Italy"),
    ("Sardinia", "Central/Southern Italy"),
    ("Abruzzo", "Central/Southern Italy"),
    ("Umbria", "Central/Southern Italy"),
    ("Basilicata", "Central/Southern Italy"),
    // Italian, region unknown; not Milan or Lombardy
    ("Unknown_Italy", "Central/Southern Italy"),
    ("Switzerland", "Europe"),
    ("France", "Europe"),
    ("Germany", "Europe"),
    ("Spain", "Europe"),
    ("Austria", "Europe"),
    ("Netherlands", "Europe"),
    ("Portugal", "Europe"),
    ("Denmark", "Europe"),
    ("Belgium", "Europe"),
    ("Luxembourg", "Europe"),
    ("Monaco", "Europe"),
    ("Cyprus", "Europe"),
    ("Albania", "Europe"),
    ("Andorra", "Europe"),
    ("Ukraine", "Europe"),
    ("Montenegro", "Europe"),
    ("San Marino", "Europe"),
    ("Malta", "Europe"),
    ("Sweden", "Europe"),
    ("Ireland", "Europe"),
    ("Turkey", "Europe"),
    ("Serbia", "Europe"),
    ("United States", "Extra-EU"),
    ("United Kingdom", "Extra-EU"),
    ("Mexico", "Extra-EU"),
    ("United Arab Emirates", "Extra-EU"),
    ("Australia", "Extra-EU"),
    ("Brazil", "Extra-EU"),
    ("Indonesia", "Extra-EU"),
    ("Colombia", "Extra-EU"),
    ("Morocco", "Extra-EU"),
    ("Guinea-Bissau", "Extra-EU"),
    ("Philippines", "Extra-EU"),
    ("South Africa", "Extra-EU"),
    ("Russia", "Extra-EU"),
    ("Taiwan", "Extra-EU"),
    ("New Zealand", "Extra-EU"),
    ("Singapore", "Extra-EU"),
    ("Thailand", "Extra-EU"),
    ("Argentina", "Extra-EU"),
    ("Costa Rica", "Extra-EU"),
    ("Hong Kong", "Extra-EU"),
    ("Guadeloupe", "Extra-EU"),
    ("Nepal", "Extra-EU"),
    ("Ghana", "Extra-EU"),
    ("Egypt", "Extra-EU"),
    ("Dominican Republic", "Extra-EU"),
];

/// Free-text property description -> property class.
pub const PROPERTY_TYPES: &[(&str, &str)] = &[
    ("Entire rental unit", "Apartment/Condo"),
    ("Entire condo", "Apartment/Condo"),
    ("Entire condominium", "Apartment/Condo"),
    ("Entire loft", "Apartment/Condo"),
    ("Entire serviced apartment", "Apartment/Condo"),
    ("Private room in rental unit", "Apartment/Condo"),
    ("Private room in condo", "Apartment/Condo"),
    ("Private room in condominium", "Apartment/Condo"),
    ("Private room in loft", "Apartment/Condo"),
    ("Private room in serviced apartment", "Apartment/Condo"),
    ("Private room in apartment", "Apartment/Condo"),
    ("Shared room in rental unit", "Apartment/Condo"),
    ("Shared room in condo", "Apartment/Condo"),
    ("Shared room in condominium", "Apartment/Condo"),
    ("Shared room in loft", "Apartment/Condo"),
    ("Shared room in apartment", "Apartment/Condo"),
    ("Room in aparthotel", "Apartment/Condo"),
    ("Room in serviced apartment", "Apartment/Condo"),
    // mostly high-rise flats in this market
    ("Entire residential home", "Apartment/Condo"),
    ("Entire home", "House"),
    ("Entire house", "House"),
    ("Entire vacation home", "House"),
    ("Entire villa", "House"),
    ("Entire townhouse", "House"),
    ("Entire cottage", "House"),
    ("Entire chalet", "House"),
    ("Entire bungalow", "House"),
    ("Entire cabin", "House"),
    ("Private room in home", "House"),
    ("Private room in house", "House"),
    ("Private room in villa", "House"),
    ("Private room in townhouse", "House"),
    ("Private room in vacation home", "House"),
    ("Private room in cottage", "House"),
    ("Private room in chalet", "House"),
    ("Private room in bungalow", "House"),
    ("Private room in cabin", "House"),
    ("Shared room in home", "House"),
    ("Shared room in house", "House"),
    ("Shared room in villa", "House"),
    ("Shared room in vacation home", "House"),
    ("Shared room in cottage", "House"),
    ("Entire guesthouse", "Guest/Hotel"),
    ("Entire guest suite", "Guest/Hotel"),
    ("Entire bed and breakfast", "Guest/Hotel"),
    ("Private room in bed and breakfast", "Guest/Hotel"),
    ("Private room in guesthouse", "Guest/Hotel"),
    ("Private room in guest suite", "Guest/Hotel"),
    ("Private room in hostel", "Guest/Hotel"),
    ("Private room in casa particular", "Guest/Hotel"),
    ("Private room in minsu", "Guest/Hotel"),
    ("Private room in ryokan", "Guest/Hotel"),
    ("Room in hotel", "Guest/Hotel"),
    ("Room in boutique hotel", "Guest/Hotel"),
    ("Room in bed and breakfast", "Guest/Hotel"),
    ("Room in hostel", "Guest/Hotel"),
    ("Room in boutique hotel or B&B", "Guest/Hotel"),
    ("Casa particular", "Guest/Hotel"),
    ("Shared room in bed and breakfast", "Guest/Hotel"),
    ("Shared room in hostel", "Guest/Hotel"),
    ("Shared room in hotel", "Guest/Hotel"),
    ("Shared room in guesthouse", "Guest/Hotel"),
    ("Tiny home", "Unique"),
    ("Entire tiny home", "Unique"),
    ("Private room in tiny home", "Unique"),
    ("Camper/RV", "Unique"),
    ("Private room in camper/rv", "Unique"),
    ("Boat", "Unique"),
    ("Houseboat", "Unique"),
    ("Yacht", "Unique"),
    ("Private room in boat", "Unique"),
    ("Shipping container", "Unique"),
    ("Treehouse", "Unique"),
    ("Private room in treehouse", "Unique"),
    ("Cave", "Unique"),
    ("Private room in cave", "Unique"),
    ("Castle", "Unique"),
    ("Private room in castle", "Unique"),
    ("Tent", "Unique"),
    ("Yurt", "Unique"),
    ("Dome", "Unique"),
    ("Windmill", "Unique"),
    ("Lighthouse", "Unique"),
    ("Train", "Unique"),
    ("Plane", "Unique"),
    ("Tower", "Unique"),
    ("Earth house", "Unique"),
    ("Cycladic house", "Unique"),
    ("Dammuso", "Unique"),
    ("Riad", "Unique"),
    ("Private room in farm stay", "Unique"),
    ("Farm stay", "Unique"),
    ("Private room in nature lodge", "Unique"),
    ("Nature lodge", "Unique"),
    // too vague to place
    ("Entire home/apt", "Ambiguous"),
    ("Entire place", "Ambiguous"),
    ("Private room", "Ambiguous"),
    ("Shared room", "Ambiguous"),
    ("Other", OTHER_PROPERTY),
    ("", OTHER_PROPERTY),
];

static LOCATION_TABLE: Lazy<LookupTable> = Lazy::new(|| {
    LookupTable::from_static("location_hierarchy", LOCATION_HIERARCHY, UNKNOWN_LOCATION)
});

static PROPERTY_TYPE_TABLE: Lazy<LookupTable> =
    Lazy::new(|| LookupTable::from_static("property_type", PROPERTY_TYPES, OTHER_PROPERTY));

static LOCATION_CATEGORY: Lazy<OrderedCategory> =
    Lazy::new(|| OrderedCategory::from_static("location_tier", &LOCATION_TIERS, 6));

static PROPERTY_CATEGORY: Lazy<OrderedCategory> =
    Lazy::new(|| OrderedCategory::from_static("property_class", &PROPERTY_CLASSES, 5));

/// Host location -> tier table. Unmapped locations become [`UNKNOWN_LOCATION`].
pub fn location_table() -> &'static LookupTable {
    &LOCATION_TABLE
}

/// Property description -> class table. Unmapped descriptions become
/// [`OTHER_PROPERTY`].
pub fn property_type_table() -> &'static LookupTable {
    &PROPERTY_TYPE_TABLE
}

/// Ordered location tiers, [`UNKNOWN_LOCATION`] being the missing label.
pub fn location_tiers() -> &'static OrderedCategory {
    &LOCATION_CATEGORY
}

/// Property classes in reporting order, [`OTHER_PROPERTY`] being the missing label.
pub fn property_classes() -> &'static OrderedCategory {
    &PROPERTY_CATEGORY
}

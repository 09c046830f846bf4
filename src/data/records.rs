//! Embedded caseload counts, 2015 (Q4 only) through 2025 (Q1 only).
//!
//! Columns are declared the way the source reports publish them; the catalog
//! transposes them into per-year records and validates shape at load time.

use super::model::TableKey;

macro_rules! cell {
    (_) => {
        None
    };
    ($v:literal) => {
        Some($v)
    };
}

/// A column of yearly counts; `_` marks a year with no separate figure.
macro_rules! counts {
    ($($v:tt),* $(,)?) => {
        &[$(cell!($v)),*]
    };
}

pub(crate) const CATALOG_YEARS: [i32; 11] =
    [2015, 2016, 2017, 2018, 2019, 2020, 2021, 2022, 2023, 2024, 2025];

/// Column-oriented literal for one annual table: `(name, label, values)`.
pub(crate) struct AnnualSource {
    pub key: TableKey,
    pub years: &'static [i32],
    pub columns: &'static [(&'static str, &'static str, &'static [Option<u64>])],
}

pub(crate) const ANNUAL_SOURCES: &[AnnualSource] = &[
    AnnualSource {
        key: TableKey::TenancyTotals,
        years: &CATALOG_YEARS,
        columns: &[
            ("Total_Applications", "Total Applications", counts![7173, 27954, 29780, 28849, 29167, 29905, 29798, 32654, 27720, 27873, 7496]),
        ],
    },
    AnnualSource {
        key: TableKey::TenancyCategories,
        years: &CATALOG_YEARS,
        columns: &[
            ("Termination_NonPayment", "Termination (Non-Payment)", counts![2981, 11646, 15224, 14380, 13695, 10462, 9851, 10833, 10599, 9108, 2731]),
            ("Rental_Bonds", "Rental Bonds", counts![1236, 4190, 4787, 4747, 4809, 5403, 5219, 5477, 5460, 6879, 1668]),
            ("General_Orders", "General Orders", counts![1276, 5325, 5618, 5344, 5806, 6388, 6407, 6871, 5571, 2623, 515]),
            ("Repairs", "Repairs", counts![101, 268, 351, 308, 320, 394, 464, 464, 479, 1128, 278]),
            ("Rent_Other_Payments", "Rent & Other Payments", counts![375, 740, 768, 699, 717, 900, 947, 1153, 1373, 3796, 886]),
            ("Termination_Breach_s87", "Termination (Breach s.87)", counts![_, 734, 845, 690, 660, 614, 700, 765, 744, _, _]),
            ("Termination_CoTenant_s102", "Termination (Co-Tenant s.102)", counts![_, 60, 74, 88, 47, 74, 64, 54, 48, _, _]),
            ("Termination_Other", "Termination (Other)", counts![1030, 2791, 3589, 3148, 3323, 4535, 5119, 5340, 5110, 4418, 1247]),
        ],
    },
    AnnualSource {
        key: TableKey::PartyTotals,
        years: &CATALOG_YEARS,
        columns: &[
            ("Landlord", "Landlord", counts![5634, 20662, 23476, 22545, 22448, 20816, 23284, 23265, 21512, 18367, 5256]),
            ("Tenant", "Tenant", counts![1387, 5562, 6304, 6304, 6719, 7568, 6514, 7995, 6208, 7505, 1950]),
            ("Other", "Other", counts![152, 1730, _, _, _, 1521, _, 1394, _, 2001, 290]),
        ],
    },
    AnnualSource {
        key: TableKey::RegistryPrivateTenancy,
        years: &CATALOG_YEARS,
        columns: &[
            ("Liverpool", "Liverpool", counts![1226, 4049, 5993, 5887, 5994, 6140, 5972, 6607, 6574, 5599, 1820]),
            ("Newcastle", "Newcastle", counts![1273, 3768, 5026, 4913, 4610, 4182, 4485, 4424, 4289, 3844, 1161]),
            ("Penrith", "Penrith", counts![1206, 3830, 5892, 5868, 6076, 5533, 4311, 4241, 4135, 3148, 869]),
            ("Sydney", "Sydney", counts![1902, 5845, 8429, 7953, 8064, 11122, 11080, 12768, 10885, 11483, 2963]),
            ("Tamworth", "Tamworth", counts![633, 1825, 2217, 2182, 2060, 1643, 2080, 2017, 1845, 1661, 482]),
            ("Wollongong", "Wollongong", counts![664, 1939, 2502, 2442, 2435, 1930, 2465, 2425, 2240, 2138, 538]),
        ],
    },
    AnnualSource {
        key: TableKey::OtherListsTotals,
        years: &CATALOG_YEARS,
        columns: &[
            ("Tenancy", "Tenancy", counts![7173, 27954, 29780, 28849, 29167, 29905, 29798, 32654, 27720, 27873, 7496]),
            ("Social_Housing", "Social Housing", counts![3405, 10448, 12588, 12702, 12782, 9682, 11126, 13001, 12002, 12277, 3507]),
            ("General", "General", counts![1334, 4204, 5103, 4632, 4550, 4895, 4492, 4948, 4961, 4855, 1165]),
            ("Home_Building", "Home Building", counts![693, 2300, 2860, 2870, 2943, 2874, 2980, 3806, 3807, 2983, 497]),
            ("Strata_Schemes", "Strata Schemes", counts![384, 1125, 736, 1192, 1328, 1609, 1498, 1612, 1490, 1417, 298]),
            ("Motor_Vehicles", "Motor Vehicles", counts![365, 1218, 1636, 1504, 1531, 1585, 1704, 1735, 1738, 1605, 351]),
        ],
    },
    AnnualSource {
        key: TableKey::RegistryTotalCcd,
        years: &CATALOG_YEARS,
        columns: &[
            ("Liverpool", "Liverpool", counts![2182, 6751, 9938, 9845, 9820, 8463, 8146, 9481, 9564, 9315, 2721]),
            ("Newcastle", "Newcastle", counts![2567, 6897, 9326, 9143, 8750, 7064, 7691, 8368, 8414, 7837, 2359]),
            ("Penrith", "Penrith", counts![2194, 6598, 10020, 10253, 10651, 8690, 7085, 7353, 6761, 5950, 2900]),
            ("Sydney", "Sydney", counts![3755, 11711, 15869, 15494, 15664, 21122, 21020, 22424, 19934, 20202, 4305]),
            ("Tamworth", "Tamworth", counts![1345, 3600, 4607, 4613, 4570, 3890, 4707, 4710, 4606, 4501, 1247]),
            ("Wollongong", "Wollongong", counts![1425, 4162, 5216, 5362, 5523, 4489, 4981, 5127, 5094, 4950, 1427]),
        ],
    },
    AnnualSource {
        key: TableKey::RegistrySocialHousing,
        years: &CATALOG_YEARS,
        columns: &[
            ("Liverpool", "Liverpool", counts![613, 1767, 2469, 2538, 2472, 1566, 1731, 1954, 2094, 2002, 562]),
            ("Newcastle", "Newcastle", counts![766, 1805, 2475, 2168, 2272, 1545, 2030, 2382, 2264, 2089, 513]),
            ("Penrith", "Penrith", counts![503, 1409, 2209, 2279, 2441, 1875, 1580, 1612, 1436, 1159, 398]),
            ("Sydney", "Sydney", counts![570, 1640, 2612, 2397, 2433, 1955, 2800, 2962, 2922, 2847, 777]),
            ("Tamworth", "Tamworth", counts![499, 1222, 1651, 1521, 1433, 1424, 1635, 1962, 2027, 1980, 670]),
            ("Wollongong", "Wollongong", counts![454, 1240, 1647, 1715, 1772, 1317, 1350, 1883, 1838, 1900, 587]),
        ],
    },
    AnnualSource {
        key: TableKey::RegistryGeneral,
        years: &CATALOG_YEARS,
        columns: &[
            ("Liverpool", "Liverpool", counts![143, 478, 602, 578, 542, 550, 595, 602, 616, 662, 155]),
            ("Newcastle", "Newcastle", counts![174, 566, 619, 640, 588, 566, 682, 706, 651, 658, 177]),
            ("Penrith", "Penrith", counts![228, 624, 861, 819, 783, 717, 628, 528, 470, 405, 110]),
            ("Sydney", "Sydney", counts![557, 1833, 2123, 1911, 1850, 2188, 1976, 2158, 2230, 2289, 570]),
            ("Tamworth", "Tamworth", counts![92, 239, 261, 250, 228, 333, 332, 304, 256, 249, 59]),
            ("Wollongong", "Wollongong", counts![140, 351, 401, 434, 428, 501, 485, 420, 399, 432, 94]),
        ],
    },
    AnnualSource {
        key: TableKey::RegistryHomeBuilding,
        years: &CATALOG_YEARS,
        columns: &[
            ("Liverpool", "Liverpool", counts![81, 266, 359, 358, 401, 370, 384, 457, 467, 396, 61]),
            ("Newcastle", "Newcastle", counts![94, 291, 381, 420, 428, 416, 457, 526, 546, 458, 90]),
            ("Penrith", "Penrith", counts![121, 421, 501, 483, 526, 462, 339, 387, 367, 288, 56]),
            ("Sydney", "Sydney", counts![273, 895, 1061, 1064, 1146, 1099, 1161, 1345, 1558, 1181, 205]),
            ("Tamworth", "Tamworth", counts![50, 149, 178, 172, 167, 163, 181, 172, 185, 142, 33]),
            ("Wollongong", "Wollongong", counts![74, 226, 269, 305, 275, 302, 334, 297, 334, 310, 52]),
        ],
    },
    AnnualSource {
        key: TableKey::RegistryStrata,
        years: &CATALOG_YEARS,
        columns: &[
            ("Liverpool", "Liverpool", counts![35, 98, 67, 79, 95, 129, 123, 118, 131, 136, 34]),
            ("Newcastle", "Newcastle", counts![34, 96, 94, 89, 105, 136, 136, 119, 118, 109, 18]),
            ("Penrith", "Penrith", counts![28, 58, 64, 56, 60, 74, 57, 47, 51, 48, 16]),
            ("Sydney", "Sydney", counts![245, 797, 630, 892, 981, 1131, 1086, 1108, 1039, 1051, 206]),
            ("Tamworth", "Tamworth", counts![15, 37, 45, 45, 42, 55, 46, 46, 52, 49, 14]),
            ("Wollongong", "Wollongong", counts![27, 73, 50, 50, 61, 63, 78, 75, 61, 53, 10]),
        ],
    },
    AnnualSource {
        key: TableKey::RegistryMotorVehicles,
        years: &CATALOG_YEARS,
        columns: &[
            ("Liverpool", "Liverpool", counts![71, 263, 324, 321, 331, 298, 308, 309, 325, 335, 75]),
            ("Newcastle", "Newcastle", counts![46, 170, 223, 215, 210, 206, 206, 234, 233, 225, 60]),
            ("Penrith", "Penrith", counts![78, 256, 331, 341, 367, 345, 345, 256, 221, 216, 31]),
            ("Sydney", "Sydney", counts![97, 360, 462, 453, 461, 471, 483, 524, 527, 489, 127]),
            ("Tamworth", "Tamworth", counts![32, 83, 115, 116, 115, 109, 108, 100, 105, 104, 22]),
            ("Wollongong", "Wollongong", counts![41, 100, 133, 138, 122, 106, 122, 118, 117, 121, 36]),
        ],
    },
    AnnualSource {
        key: TableKey::RegistryCommercial,
        years: &CATALOG_YEARS,
        columns: &[
            ("Liverpool", "Liverpool", counts![10, 51, 74, 72, 63, 67, 66, 72, 82, 86, 24]),
            ("Newcastle", "Newcastle", counts![29, 70, 110, 115, 121, 101, 90, 104, 118, 129, 39]),
            ("Penrith", "Penrith", counts![27, 67, 85, 90, 86, 98, 72, 60, 63, 64, 10]),
            ("Sydney", "Sydney", counts![104, 331, 430, 420, 415, 430, 391, 394, 366, 372, 83]),
            ("Tamworth", "Tamworth", counts![9, 49, 67, 72, 60, 49, 56, 55, 64, 60, 13]),
            ("Wollongong", "Wollongong", counts![18, 58, 74, 77, 82, 85, 66, 70, 74, 81, 25]),
        ],
    },
    AnnualSource {
        key: TableKey::RegistryResidentialCommunities,
        years: &CATALOG_YEARS,
        columns: &[
            ("Liverpool", "Liverpool", counts![2, 5, 5, 10, 25, 14, 20, 17, 15, 15, 9]),
            ("Newcastle", "Newcastle", counts![40, 94, 109, 164, 244, 104, 169, 129, 114, 91, 129]),
            ("Penrith", "Penrith", counts![1, 11, 8, 71, 95, 30, 19, 25, 16, 18, 3]),
            ("Sydney", "Sydney", counts![3, 18, 31, 24, 31, 20, 39, 40, 54, 65, 17]),
            ("Tamworth", "Tamworth", counts![12, 41, 53, 96, 239, 101, 108, 88, 81, 53, 8]),
            ("Wollongong", "Wollongong", counts![2, 59, 70, 57, 129, 61, 74, 127, 61, 43, 9]),
        ],
    },
    AnnualSource {
        key: TableKey::RegistryRetirementVillages,
        years: &CATALOG_YEARS,
        columns: &[
            ("Liverpool", "Liverpool", counts![1, 1, 4, 3, 4, 6, 2, 2, 1, 1, 1]),
            ("Newcastle", "Newcastle", counts![2, 18, 24, 27, 24, 26, 23, 18, 19, 20, 2]),
            ("Penrith", "Penrith", counts![0, 9, 3, 7, 5, 4, 3, 4, 2, 1, 0]),
            ("Sydney", "Sydney", counts![4, 12, 14, 13, 15, 19, 19, 22, 16, 15, 0]),
            ("Tamworth", "Tamworth", counts![1, 3, 2, 1, 1, 4, 3, 4, 1, 5, 4]),
            ("Wollongong", "Wollongong", counts![0, 7, 7, 5, 7, 4, 5, 5, 12, 5, 2]),
        ],
    },

];

/// `(year, category as published, landlord, tenant, total)`.
pub(crate) const PARTY_BY_CATEGORY: &[(i32, &str, u64, u64, u64)] = &[
    (2017, "Rental Bonds", 1527, 3117, 4787),
    (2017, "General Orders", 3411, 1872, 5618),
    (2017, "Rent and other payments", 380, 355, 768),
    (2017, "Repairs", 6, 329, 351),
    (2017, "Termination - Breach (s.87)", 845, 0, 845),
    (2017, "Termination non-payment of rent", 15224, 0, 15224),
    (2017, "Termination by co-tenant (s102)", 0, 74, 74),
    (2017, "Termination - Other", 2506, 1023, 3589),
    (2018, "Rental bonds", 1496, 3124, 4747),
    (2018, "General orders", 3292, 1746, 5344),
    (2018, "Rent and other payments", 332, 322, 699),
    (2018, "Repairs", 0, 284, 308),
    (2018, "Termination - breach (s.87)", 690, 0, 690),
    (2018, "Termination - non-payment of rent", 14380, 0, 14380),
    (2018, "Termination by co-tenant (s102)", 0, 88, 88),
    (2018, "Termination - other", 2303, 798, 3148),
    (2019, "Rental bonds", 1483, 3194, 4809),
    (2019, "General orders", 3615, 1870, 5806),
    (2019, "Rent and other payments", 304, 367, 717),
    (2019, "Repairs", 0, 293, 320),
    (2019, "Termination - breach (s.87)", 660, 0, 660),
    (2019, "Termination - non-payment of rent", 13695, 0, 13695),
    (2019, "Termination by co-tenant (s102)", 0, 47, 47),
    (2019, "Termination - other", 2274, 993, 3323),
    (2020, "Rental Bonds", 1694, 3504, 5403),
    (2020, "General Orders", 3935, 2095, 6388),
    (2020, "Rent and other payments", 360, 490, 900),
    (2020, "Repairs", 0, 366, 394),
    (2020, "Termination - Breach (s 87)", 614, 0, 614),
    (2020, "Termination non-payment of rent", 10462, 0, 10462),
    (2020, "Termination by a co-tenant (s 102)", 0, 74, 74),
    (2020, "Termination - Other", 3067, 1386, 4535),
    (2021, "Rental Bonds", 1664, 3363, 5219),
    (2021, "General Orders", 3988, 2080, 6407),
    (2021, "Rent and other payments", 416, 479, 947),
    (2021, "Repairs", 0, 430, 464),
    (2021, "Termination - Breach (s 87)", 700, 0, 700),
    (2021, "Termination non-payment of rent", 9851, 0, 9851),
    (2021, "Termination by a co-tenant (s 102)", 0, 64, 64),
    (2021, "Termination - Other", 3501, 1530, 5119),
    (2022, "Rental Bonds", 1771, 3456, 5477),
    (2022, "General Orders", 4303, 2193, 6871),
    (2022, "Rent and other payments", 480, 608, 1153),
    (2022, "Repairs", 0, 435, 464),
    (2022, "Termination - Breach (s 87)", 765, 0, 765),
    (2022, "Termination non-payment of rent", 10833, 0, 10833),
    (2022, "Termination by a co-tenant (s 102)", 0, 54, 54),
    (2022, "Termination - Other", 3677, 1559, 5340),
    (2023, "Rental Bonds", 1708, 3555, 5460),
    (2023, "General Orders", 3454, 1831, 5571),
    (2023, "Rent and other payments", 752, 546, 1373),
    (2023, "Repairs", 116, 328, 479),
    (2023, "Termination - Breach (s 87)", 744, 0, 744),
    (2023, "Termination non-payment of rent", 10599, 0, 10599),
    (2023, "Termination by a co-tenant (s 102)", 0, 48, 48),
    (2023, "Termination - Other", 3513, 1455, 5110),
    (2024, "Rental Bonds", 2938, 3745, 6879),
    (2024, "General Orders", 1521, 937, 2623),
    (2024, "Rent and other payments", 2249, 1379, 3796),
    (2024, "Repairs", 416, 668, 1128),
    (2024, "Termination non-payment of rent", 8512, 106, 9108),
    (2024, "Termination other", 3714, 534, 4418),
];

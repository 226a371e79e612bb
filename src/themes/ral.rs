use egui::Color32;

/// The subset of the RAL classic palette the themes are built from.
pub const RAL_COLORS: &[(u16, &str, Color32)] = &[
    (2005, "Luminous orange", Color32::from_rgb(255, 75, 17)),
    (2009, "Traffic orange", Color32::from_rgb(226, 83, 3)),
    (5005, "Signal blue", Color32::from_rgb(30, 45, 110)),
    (6027, "Light green", Color32::from_rgb(132, 195, 190)),
    (7046, "Telegrey 2", Color32::from_rgb(130, 137, 143)),
    (7047, "Telegrey 4", Color32::from_rgb(208, 208, 208)),
    (9003, "Signal white", Color32::from_rgb(244, 244, 244)),
    (9004, "Signal black", Color32::from_rgb(40, 40, 40)),
    (9011, "Graphite black", Color32::from_rgb(28, 28, 28)),
];

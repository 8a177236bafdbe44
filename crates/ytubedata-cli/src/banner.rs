const BANNER: &str = r"
+----------------------------------------------------------+
|                                                          |
|   _   _ _         _        ____        _                 |
|  | | | | |_ _   _| |__   |  _ \  __ _| |_ __ _          |
|  | |_| | __| | | | '_ \  | | | |/ _` | __/ _` |         |
|   \__, | |_| |_| | |_) | | |_| | (_| | || (_| |         |
|   |___/ \__|\__,_|_.__/  |____/ \__,_|\__\__,_|         |
|                                                          |
|        video and channel metadata from YouTube          |
|                                                          |
+----------------------------------------------------------+
";

/// Writes the banner to stderr so piped JSON/CSV output stays clean.
pub(crate) fn print_banner() {
    eprintln!("{BANNER}");
}

//! About panel: license and attribution blocks injected into the page.

use serde::{Deserialize, Serialize};

/// Container receiving the product license block in the split layout.
pub const LICENSE_CONTAINER: &str = "lic";
/// Container receiving the attribution block in the split layout.
pub const PACKAGES_CONTAINER: &str = "pkg";
/// Single container receiving both blocks.
pub const DOCUMENT_CONTAINER: &str = "doc";

const MIT_LICENSE: &str = "<p>Permission is hereby granted, free of charge, to any person \
obtaining a copy of this software and associated documentation files (the \"Software\"), to \
deal in the Software without restriction, including without limitation the rights to use, copy, \
modify, merge, publish, distribute, sublicense, and/or sell copies of the Software, and to \
permit persons to whom the Software is furnished to do so, subject to the following \
conditions:</p><p>The above copyright notice and this permission notice shall be included in \
all copies or substantial portions of the Software.</p><p>THE SOFTWARE IS PROVIDED \"AS IS\", \
WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES \
OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE \
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN \
ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR \
THE USE OR OTHER DEALINGS IN THE SOFTWARE.</p>";

/// An upstream package credited in the attribution block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Package {
    pub name: &'static str,
    pub copyright: &'static str,
    pub license: &'static str,
}

const PRODUCT: Package = Package {
    name: "openHASP",
    copyright: "2019-2022 Francis Van Roie",
    license: "MIT License",
};

const LOVYANGFX: Package = Package {
    name: "LovyanGFX",
    copyright: "2020 lovyan03 (https://github.com/lovyan03) All rights reserved.",
    license: "FreeBSD License",
};

const TFT_ESPI: Package = Package {
    name: "TFT_eSPI",
    copyright: "2020 Bodmer (https://github.com/Bodmer) All rights reserved.",
    license: "FreeBSD License",
};

const BEFORE_GRAPHICS: [Package; 2] = [
    Package {
        name: "HASwitchPlate",
        copyright: "2019 Allen Derusha allen@derusha.org",
        license: "MIT License",
    },
    Package {
        name: "LVGL",
        copyright: "2021 LVGL Kft",
        license: "MIT License",
    },
];

const AFTER_GRAPHICS: [Package; 7] = [
    Package {
        name: "Adafruit_GFX",
        copyright: "2012 Adafruit Industries. All rights reserved",
        license: "BSD License",
    },
    Package {
        name: "ArduinoJson",
        copyright: "2014-2021 Benoit BLANCHON",
        license: "MIT License",
    },
    Package {
        name: "PubSubClient",
        copyright: "2008-2015 Nicholas O&apos;Leary",
        license: "MIT License",
    },
    Package {
        name: "ArduinoLog",
        copyright: "2017,2018 Thijs Elenbaas, MrRobot62, rahuldeo2047, NOX73, dhylands, \
                    Josha blemasle, mfalkvidd",
        license: "MIT License",
    },
    Package {
        name: "QR Code generator",
        copyright: "Project Nayuki",
        license: "MIT License",
    },
    Package {
        name: "SimpleFTPServer",
        copyright: "2017 Renzo Mischianti www.mischianti.org All right reserved.",
        license: "MIT License",
    },
    Package {
        name: "AceButton",
        copyright: "2018 Brian T. Park",
        license: "MIT License",
    },
];

/// Where the panel goes in the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AboutLayout {
    /// License into `lic`, attributions into `pkg`.
    #[default]
    Split,
    /// Both blocks into `doc`.
    Single,
}

/// HTML destined for one page container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelBlock {
    pub container: &'static str,
    pub html: String,
}

/// The about/license panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AboutPanel {
    pub layout: AboutLayout,
    /// Credit LovyanGFX as the graphics backend instead of `TFT_eSPI`.
    pub lovyangfx: bool,
}

impl AboutPanel {
    #[must_use]
    pub fn new(layout: AboutLayout, lovyangfx: bool) -> Self {
        Self { layout, lovyangfx }
    }

    /// Packages credited in the attribution block, in display order.
    #[must_use]
    pub fn packages(&self) -> Vec<Package> {
        let graphics = if self.lovyangfx { LOVYANGFX } else { TFT_ESPI };
        BEFORE_GRAPHICS
            .into_iter()
            .chain(std::iter::once(graphics))
            .chain(AFTER_GRAPHICS)
            .collect()
    }

    /// Product copyright followed by the license text.
    #[must_use]
    pub fn license_html(&self) -> String {
        let mut html = heading(&PRODUCT);
        html.push_str(MIT_LICENSE);
        html
    }

    /// Credits for the open-source work the product builds on.
    #[must_use]
    pub fn packages_html(&self) -> String {
        let mut html =
            String::from("<hr><p>Based on the previous work of the following open source developers:</p>");
        for package in self.packages() {
            html.push_str(&heading(&package));
        }
        html
    }

    /// The blocks to inject, by container.
    #[must_use]
    pub fn render(&self) -> Vec<PanelBlock> {
        match self.layout {
            AboutLayout::Split => vec![
                PanelBlock {
                    container: LICENSE_CONTAINER,
                    html: self.license_html(),
                },
                PanelBlock {
                    container: PACKAGES_CONTAINER,
                    html: self.packages_html(),
                },
            ],
            AboutLayout::Single => vec![PanelBlock {
                container: DOCUMENT_CONTAINER,
                html: self.license_html() + &self.packages_html(),
            }],
        }
    }
}

fn heading(package: &Package) -> String {
    format!(
        "<h3>{}</h3><p>Copyright&copy; {}<br>{}</p>",
        package.name, package.copyright, package.license
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_render_split_layout_into_two_containers() {
        let blocks = AboutPanel::default().render();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].container, "lic");
        assert_eq!(blocks[1].container, "pkg");
        assert!(blocks[0].html.starts_with("<h3>openHASP</h3>"));
        assert!(blocks[0].html.contains("Permission is hereby granted"));
        assert!(blocks[1].html.starts_with("<hr>"));
    }

    #[test]
    fn should_render_single_layout_into_doc() {
        let blocks = AboutPanel::new(AboutLayout::Single, true).render();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].container, "doc");
        let html = &blocks[0].html;
        let license_at = html.find("Permission").unwrap();
        let credits_at = html.find("Based on the previous work").unwrap();
        assert!(license_at < credits_at);
    }

    #[test]
    fn should_credit_lovyangfx_when_flag_set() {
        let html = AboutPanel::new(AboutLayout::Split, true).packages_html();
        assert!(html.contains("<h3>LovyanGFX</h3>"));
        assert!(!html.contains("<h3>TFT_eSPI</h3>"));
    }

    #[test]
    fn should_credit_tft_espi_when_flag_clear() {
        let html = AboutPanel::new(AboutLayout::Split, false).packages_html();
        assert!(html.contains("<h3>TFT_eSPI</h3>"));
        assert!(!html.contains("<h3>LovyanGFX</h3>"));
    }

    #[test]
    fn should_place_graphics_backend_after_lvgl() {
        let names: Vec<&str> = AboutPanel::new(AboutLayout::Split, true)
            .packages()
            .iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(&names[..3], &["HASwitchPlate", "LVGL", "LovyanGFX"]);
        assert_eq!(names.len(), 10);
        assert_eq!(names.last(), Some(&"AceButton"));
    }

    #[test]
    fn should_render_identically_on_every_call() {
        let panel = AboutPanel::default();
        assert_eq!(panel.render(), panel.render());
    }

    #[test]
    fn should_parse_layout_from_toml_string() {
        #[derive(Deserialize)]
        struct Wrapper {
            layout: AboutLayout,
        }
        let parsed: Wrapper = toml::from_str("layout = 'single'").unwrap();
        assert_eq!(parsed.layout, AboutLayout::Single);
    }
}

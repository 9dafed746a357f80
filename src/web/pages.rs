//! Server-rendered HTML pages.
//!
//! Pages are assembled as strings. Every piece of text that did not come
//! from a literal in this file is escaped with [`escape_html`].

use std::fmt::Write;

use crate::branding::TAGLINE;
use crate::config::SiteConfig;
use crate::contact::FieldErrors;
use crate::content::{SiteContent, TestimonialCarousel, NAV_LINKS};
use crate::models::{RgbColor, Section, VariantCatalog};
use crate::render;
use crate::render::svg::XML_PROLOG;
use crate::visualizer::ColorVisualizer;

use super::query::{encode_component, to_query};

/// Data shared by every page.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Business details
    pub site: &'a SiteConfig,
    /// Static content
    pub content: &'a SiteContent,
    /// Path of the page being rendered, for nav highlighting
    pub path: &'a str,
    /// Year shown in the footer copyright
    pub year: i32,
}

/// A status line shown above a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Submission relayed
    Success(String),
    /// Submission could not be relayed
    Error(String),
}

/// Values and feedback of a lead form.
#[derive(Debug, Clone, Default)]
pub struct FormView {
    /// Submitted name
    pub name: String,
    /// Submitted email
    pub email: String,
    /// Submitted subject (contact form only)
    pub subject: String,
    /// Submitted message
    pub message: String,
    /// Per-field validation messages
    pub errors: FieldErrors,
    /// Result of the last submission
    pub notice: Option<Notice>,
}

/// Escapes text for HTML element content and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn open_page(html: &mut String, ctx: &PageContext<'_>, title: &str) {
    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html lang=\"en\">\n");
    html.push_str("<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str(
        "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    let _ = writeln!(
        html,
        "  <title>{} | {}</title>",
        escape_html(title),
        escape_html(&ctx.site.business_name)
    );
    html.push_str("  <link rel=\"icon\" href=\"/assets/favicon.svg\" type=\"image/svg+xml\">\n");
    html.push_str("  <link rel=\"stylesheet\" href=\"/assets/styles.css\">\n");
    html.push_str("</head>\n");
    html.push_str("<body>\n");
    header(html, ctx);
}

fn close_page(html: &mut String, ctx: &PageContext<'_>) {
    footer(html, ctx);
    html.push_str("</body>\n</html>\n");
}

fn header(html: &mut String, ctx: &PageContext<'_>) {
    let site = ctx.site;
    html.push_str("<header class=\"site-header\">\n");
    let _ = writeln!(
        html,
        "<div class=\"info-bar\">Working Hours {} <span class=\"accent\">{}</span></div>",
        escape_html(&site.working_days),
        escape_html(&site.working_hours)
    );
    html.push_str("<div class=\"main-header\">\n");
    let _ = writeln!(
        html,
        "<a class=\"logo\" href=\"/\">{}</a>",
        escape_html(&site.business_name)
    );
    html.push_str("<nav>\n");
    for link in NAV_LINKS {
        let class = if link.path == ctx.path { " class=\"active\"" } else { "" };
        let _ = writeln!(html, "<a href=\"{}\"{class}>{}</a>", link.path, link.label);
    }
    html.push_str("</nav>\n");
    let _ = writeln!(
        html,
        "<div class=\"call-us\"><span>Call Us</span><a href=\"{}\">{}</a></div>",
        escape_html(&site.phone_href()),
        escape_html(&site.phone)
    );
    html.push_str("</div>\n</header>\n");
}

fn footer(html: &mut String, ctx: &PageContext<'_>) {
    let site = ctx.site;
    html.push_str("<footer class=\"footer\">\n<div class=\"footer-grid\">\n");
    let _ = writeln!(
        html,
        "<div><p class=\"footer-brand\">{}</p><p>We are a locally owned painting company based in {}, \
         specializing in interior and exterior painting for residential and commercial properties.</p></div>",
        escape_html(&site.business_name),
        escape_html(&site.location)
    );
    html.push_str("<div><h3 class=\"footer-heading\">Our Services</h3><ul>\n");
    for service in &ctx.content.services {
        let _ = writeln!(
            html,
            "<li><a class=\"footer-link\" href=\"/gallery\">{}</a></li>",
            escape_html(&service.title)
        );
    }
    html.push_str("</ul></div>\n");
    let _ = writeln!(
        html,
        "<div><h3 class=\"footer-heading\">Contact Us</h3>\
         <p><strong>Web:</strong> <a href=\"{}\">{}</a></p>\
         <p><strong>Phone:</strong> <a href=\"{}\">{}</a></p><p>{}</p></div>",
        escape_html(&site.website),
        escape_html(site.website_label()),
        escape_html(&site.phone_href()),
        escape_html(&site.phone),
        escape_html(&site.location)
    );
    html.push_str("</div>\n");
    let _ = writeln!(
        html,
        "<p class=\"copyright\">&copy; {} {}. All rights reserved.</p>",
        ctx.year,
        escape_html(&site.business_name)
    );
    html.push_str("</footer>\n");
}

fn hero(html: &mut String, title: &str) {
    let _ = writeln!(
        html,
        "<section class=\"hero hero-short\"><h1>{}</h1><p class=\"tagline\">{}</p></section>",
        escape_html(title),
        TAGLINE
    );
}

fn notice(html: &mut String, notice: Option<&Notice>) {
    match notice {
        Some(Notice::Success(text)) => {
            let _ = writeln!(html, "<p class=\"notice success\" role=\"status\">{}</p>", escape_html(text));
        }
        Some(Notice::Error(text)) => {
            let _ = writeln!(html, "<p class=\"notice error\" role=\"alert\">{}</p>", escape_html(text));
        }
        None => {}
    }
}

fn field(html: &mut String, form: &FormView, name: &str, label: &str, kind: &str, placeholder: &str) {
    let value = match name {
        "name" => &form.name,
        "email" => &form.email,
        "subject" => &form.subject,
        _ => &form.message,
    };
    let error = form.errors.get(name);
    let invalid = if error.is_some() { " invalid" } else { "" };

    let _ = writeln!(html, "<div class=\"field\"><label for=\"{name}\">{label}</label>");
    if kind == "textarea" {
        let _ = writeln!(
            html,
            "<textarea id=\"{name}\" name=\"{name}\" class=\"form-textarea{invalid}\" rows=\"6\" placeholder=\"{placeholder}\">{}</textarea>",
            escape_html(value)
        );
    } else {
        let _ = writeln!(
            html,
            "<input type=\"{kind}\" id=\"{name}\" name=\"{name}\" class=\"form-input{invalid}\" placeholder=\"{placeholder}\" value=\"{}\">",
            escape_html(value)
        );
    }
    if let Some(error) = error {
        let _ = writeln!(html, "<p class=\"field-error\">{}</p>", escape_html(error));
    }
    html.push_str("</div>\n");
}

/// Landing page with services, counter, features, testimonials and the
/// free quote form.
pub fn landing(ctx: &PageContext<'_>, carousel: TestimonialCarousel, quote: &FormView) -> String {
    let mut html = String::new();
    let content = ctx.content;
    open_page(&mut html, ctx, "Home");

    let _ = writeln!(
        html,
        "<section class=\"hero\"><h1>{}</h1><p>{}</p>\
         <div class=\"actions\"><a class=\"btn-gold\" href=\"/gallery\">Preview Colors</a>\
         <a class=\"btn-gold-outline\" href=\"#quote\">Get Free Quote</a></div></section>",
        escape_html(&content.hero.title),
        escape_html(&content.hero.body)
    );

    html.push_str("<section class=\"services\">\n");
    for service in &content.services {
        let _ = writeln!(
            html,
            "<article class=\"service-card\"><h3>{}</h3><p>{}</p></article>",
            escape_html(&service.title),
            escape_html(&service.description)
        );
    }
    html.push_str("</section>\n");

    let _ = writeln!(
        html,
        "<section class=\"cta\"><div class=\"counter-box\"><div class=\"counter-number\">{}</div>\
         <div class=\"counter-label\">Years of Experience</div></div>\
         <h2>Are you looking for professional painting services?</h2>\
         <div><p>We're your neighborhood experts in interior and exterior projects for both homes \
         and businesses.</p><a class=\"btn-gold\" href=\"/contact\">Get a Free Quote</a></div></section>",
        ctx.site.years_of_experience
    );

    html.push_str("<section class=\"features\">\n");
    for feature in &content.features {
        let _ = writeln!(
            html,
            "<div class=\"feature-box\"><h3>{}</h3><p>{}</p></div>",
            escape_html(&feature.title),
            escape_html(&feature.description)
        );
    }
    html.push_str("</section>\n");

    testimonials(&mut html, content, carousel);

    html.push_str("<section id=\"quote\" class=\"quote\">\n");
    html.push_str("<p class=\"offer\">Limited Time Offer</p><h2>Get Your Free Quote Today!</h2>\n");
    html.push_str("<p>Transform your space with professional painting. No obligation, no hassle.</p>\n");
    notice(&mut html, quote.notice.as_ref());
    html.push_str("<form method=\"post\" action=\"/quote#quote\">\n");
    field(&mut html, quote, "name", "Your Name *", "text", "John Doe");
    field(&mut html, quote, "email", "Your Email *", "email", "john@example.com");
    field(&mut html, quote, "message", "Tell us about your project *", "textarea", "I'm looking to paint my...");
    html.push_str("<button type=\"submit\" class=\"btn-gold\">Get My Free Quote</button>\n");
    html.push_str("<p class=\"privacy\">We respect your privacy. Your information will never be shared.</p>\n");
    html.push_str("</form>\n</section>\n");

    close_page(&mut html, ctx);
    html
}

fn testimonials(html: &mut String, content: &SiteContent, carousel: TestimonialCarousel) {
    let Some(current) = content.testimonials.get(carousel.current()) else {
        return;
    };
    html.push_str("<section id=\"testimonials\" class=\"testimonials\">\n");
    html.push_str("<h2>What Our Clients Say</h2>\n");
    let _ = writeln!(
        html,
        "<div class=\"testimonial-card\"><span class=\"testimonial-rating\">{} &#9733;</span>\
         <img class=\"testimonial-avatar\" src=\"{}\" alt=\"{}\"><h3>{}</h3><p>{}</p></div>",
        current.rating,
        escape_html(&current.image),
        escape_html(&current.name),
        escape_html(&current.name),
        escape_html(&current.text)
    );
    let _ = writeln!(
        html,
        "<a class=\"slide-prev\" href=\"/?testimonial={}#testimonials\" aria-label=\"Previous testimonial\">&lsaquo;</a>\
         <a class=\"slide-next\" href=\"/?testimonial={}#testimonials\" aria-label=\"Next testimonial\">&rsaquo;</a>",
        carousel.prev_index(),
        carousel.next_index()
    );
    html.push_str("<div class=\"dots\">");
    for index in 0..carousel.len() {
        let class = if index == carousel.current() { "dot active" } else { "dot" };
        let _ = write!(
            html,
            "<a class=\"{class}\" href=\"/?testimonial={index}#testimonials\" aria-label=\"Go to testimonial {}\"></a>",
            index + 1
        );
    }
    html.push_str("</div>\n</section>\n");
}

/// Gallery page: the color visualizer and the recent-project tiles.
pub fn gallery(
    ctx: &PageContext<'_>,
    visualizer: &ColorVisualizer<'_>,
    catalogs: &[VariantCatalog],
) -> String {
    let mut html = String::new();
    open_page(&mut html, ctx, "Gallery");
    hero(&mut html, "Gallery");

    html.push_str("<section id=\"visualizer\" class=\"visualizer\">\n");
    let svg = render::render_visualizer(visualizer);
    let _ = writeln!(
        html,
        "<div class=\"house\" title=\"{}\">{}</div>",
        escape_html(&describe_active(visualizer)),
        svg.strip_prefix(XML_PROLOG).unwrap_or(&svg)
    );

    html.push_str("<div class=\"controls\">\n");
    html.push_str("<h2>Preview Your Home Colors</h2>\n");
    html.push_str("<p>Select a part of the house and try different colors to visualize your project.</p>\n");

    html.push_str("<div class=\"variant-tabs\">");
    for catalog in catalogs {
        let class = if catalog.variant == visualizer.variant() { " active" } else { "" };
        let _ = write!(
            html,
            "<a class=\"variant-tab{class}\" href=\"/gallery?variant={}#visualizer\">{}</a>",
            catalog.variant.id(),
            catalog.variant.display_name()
        );
    }
    html.push_str("</div>\n");

    let _ = writeln!(
        html,
        "<div class=\"selected\">Selected: <strong>{}</strong></div>",
        visualizer.active_section().label()
    );

    html.push_str("<div class=\"section-buttons\">");
    for section in visualizer.catalog().section_ids() {
        let mut next = visualizer.clone();
        if next.select_section(section).is_err() {
            continue;
        }
        let class = if section == visualizer.active_section() { " active" } else { "" };
        let _ = write!(
            html,
            "<a class=\"color-section-btn{class}\" href=\"/gallery?{}#visualizer\">{}</a>",
            escape_html(&to_query(&next)),
            section.label()
        );
    }
    html.push_str("</div>\n");

    swatches(&mut html, visualizer);
    custom_color_form(&mut html, visualizer);
    presets(&mut html, visualizer);

    let mut reset = visualizer.clone();
    reset.reset_colors();
    let _ = writeln!(
        html,
        "<div class=\"visualizer-actions\"><a class=\"btn-gold-outline\" href=\"/gallery?{}#visualizer\">Reset</a>\
         <a class=\"btn-gold\" href=\"/gallery?{}&amp;randomize=1#visualizer\">Randomize</a></div>",
        escape_html(&to_query(&reset)),
        escape_html(&to_query(visualizer))
    );
    html.push_str("</div>\n</section>\n");

    gallery_grid(&mut html, ctx);
    close_page(&mut html, ctx);
    html
}

fn swatches(html: &mut String, visualizer: &ColorVisualizer<'_>) {
    html.push_str("<h4>Color Options</h4>\n<div class=\"swatches\">");
    let selected = visualizer.selected_swatch();
    for option in visualizer.active_options() {
        let mut next = visualizer.clone();
        next.apply_color(option.color);
        let ring = if selected == Some(option) { " selected" } else { "" };
        let _ = write!(
            html,
            "<a class=\"color-swatch-btn{ring}\" href=\"/gallery?{}#visualizer\">\
             <span class=\"color-swatch\" style=\"background-color: {}\"></span>{}</a>",
            escape_html(&to_query(&next)),
            option.color,
            escape_html(&option.name)
        );
    }
    html.push_str("</div>\n");
}

fn custom_color_form(html: &mut String, visualizer: &ColorVisualizer<'_>) {
    html.push_str("<h4>Custom Color</h4>\n");
    html.push_str("<form class=\"custom-color\" method=\"get\" action=\"/gallery#visualizer\">");
    for pair in to_query(visualizer).split('&') {
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        if key == "custom_color" {
            continue;
        }
        let _ = write!(
            html,
            "<input type=\"hidden\" name=\"{}\" value=\"{}\">",
            escape_html(key),
            escape_html(value)
        );
    }
    let custom: RgbColor = visualizer.custom_color();
    let _ = writeln!(
        html,
        "<input type=\"color\" name=\"custom\" value=\"{custom}\"><span class=\"custom-value\">{}</span>\
         <button type=\"submit\" class=\"btn-gold-outline\">Apply</button></form>",
        custom.to_hex().to_uppercase()
    );
}

fn presets(html: &mut String, visualizer: &ColorVisualizer<'_>) {
    html.push_str("<h4>Curated Palettes</h4>\n<div class=\"presets\">");
    let matching = visualizer.matching_preset();
    for preset in &visualizer.catalog().presets {
        let mut next = visualizer.clone();
        if next.apply_preset(preset).is_err() {
            continue;
        }
        let class = if matching == Some(preset) { " active" } else { "" };
        let _ = write!(
            html,
            "<a class=\"btn-gold-outline preset{class}\" href=\"/gallery?{}#visualizer\">{}</a>",
            escape_html(&to_query(&next)),
            escape_html(&preset.name)
        );
    }
    html.push_str("</div>\n");
}

fn gallery_grid(html: &mut String, ctx: &PageContext<'_>) {
    html.push_str("<section class=\"projects\">\n<h2>Our Recent Projects</h2>\n");
    html.push_str(
        "<p>Browse through our portfolio of completed projects to see the quality and attention \
         to detail we bring to every job.</p>\n<div class=\"gallery-grid\">\n",
    );
    for item in &ctx.content.gallery {
        let _ = writeln!(
            html,
            "<figure class=\"gallery-item\"><img src=\"/api/visualizer/{}/house.svg?preset={}&amp;outline=none\" alt=\"{}\">\
             <figcaption>{}</figcaption></figure>",
            item.variant.id(),
            encode_component(&item.preset),
            escape_html(&item.title),
            escape_html(&item.title)
        );
    }
    html.push_str("</div>\n</section>\n");
}

/// Contact page with the estimate request form and business details.
pub fn contact(ctx: &PageContext<'_>, form: &FormView) -> String {
    let mut html = String::new();
    let site = ctx.site;
    open_page(&mut html, ctx, "Contact Us");
    hero(&mut html, "Contact Us");

    html.push_str("<section class=\"contact\">\n<div class=\"contact-form\">\n");
    html.push_str("<h2>Request a Free Estimate</h2>\n");
    html.push_str(
        "<p>Ready to refresh your home or business? Fill out the form below with your project \
         details, and our local painting experts will provide your free estimate.</p>\n",
    );
    notice(&mut html, form.notice.as_ref());
    html.push_str("<form method=\"post\" action=\"/contact\">\n");
    field(&mut html, form, "name", "Your Name *", "text", "John Doe");
    field(&mut html, form, "email", "Your Email *", "email", "john@example.com");
    field(&mut html, form, "subject", "Subject", "text", "What's your project about?");
    field(&mut html, form, "message", "Your Message *", "textarea", "Tell us about your project...");
    html.push_str("<button type=\"submit\" class=\"btn-gold\">Send Message</button>\n</form>\n</div>\n");

    let _ = writeln!(
        html,
        "<aside class=\"contact-info\"><h3>Contact Information</h3>\
         <h4>Phone</h4><p><a href=\"{phone_href}\">{phone}</a></p>\
         <h4>Website</h4><p><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a></p>\
         <h4>Location</h4><p>{}</p>\
         <h4>Working Hours</h4><p>{}<br>{}</p>\
         <div class=\"urgent\"><h4>Need Urgent Help?</h4>\
         <p>For immediate assistance, give us a call and we'll be happy to help.</p>\
         <a class=\"btn-gold\" href=\"{phone_href}\">Call Now</a></div></aside>",
        escape_html(&site.website),
        escape_html(site.website_label()),
        escape_html(&site.location),
        escape_html(&site.working_days),
        escape_html(&site.working_hours),
        phone_href = escape_html(&site.phone_href()),
        phone = escape_html(&site.phone),
    );
    html.push_str("</section>\n");

    close_page(&mut html, ctx);
    html
}

/// Plain error page (unknown variant, bad visualizer link).
pub fn error_page(ctx: &PageContext<'_>, title: &str, message: &str) -> String {
    let mut html = String::new();
    open_page(&mut html, ctx, title);
    hero(&mut html, title);
    let _ = writeln!(
        html,
        "<section class=\"error\"><p>{}</p><p><a class=\"btn-gold\" href=\"/gallery\">Back to the visualizer</a></p></section>",
        escape_html(message)
    );
    close_page(&mut html, ctx);
    html
}

/// Section label with the selected swatch name, for accessible summaries.
pub fn describe_active(visualizer: &ColorVisualizer<'_>) -> String {
    let section: Section = visualizer.active_section();
    match visualizer.selected_swatch() {
        Some(option) => format!("{}: {}", section.label(), option.name),
        None => format!(
            "{}: custom {}",
            section.label(),
            visualizer.applied().get(section).unwrap_or_default()
        ),
    }
}

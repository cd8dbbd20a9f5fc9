//! Cross-crate scenarios for the page and PDF commands.

#[cfg(test)]
mod expand_page;
#[cfg(test)]
mod unpack_pdf;
#[cfg(test)]
mod util;

/// `(symbol, label, description)` for every instrument shipped with the dashboard.
pub const BUILTIN_INSTRUMENTS: [(&str, &str, &str); 25] = [
    // Broad ETFs
    ("VAS.AX", "VAS - Vanguard Australian Shares", "Vanguard Australian Shares Index ETF"),
    ("IVV.AX", "IVV - iShares S&P 500", "iShares S&P 500 ETF"),
    ("OOO.AX", "OOO - BetaShares Crude Oil", "BetaShares Crude Oil Index ETF"),
    ("NDQ.AX", "NDQ - BetaShares NASDAQ 100", "BetaShares NASDAQ 100 ETF"),
    ("ASIA.AX", "ASIA - BetaShares Asia Technology", "BetaShares Asia Technology Tigers ETF"),
    ("VDHG.AX", "VDHG - Vanguard Diversified High Growth", "Vanguard Diversified High Growth Index ETF"),
    // Crypto-related
    ("CRYP.AX", "CRYP - BetaShares Crypto Innovators", "Crypto-focused companies ETF (High Volatility)"),
    ("COIN", "COIN - Coinbase Global", "Cryptocurrency Exchange Platform (High Volatility)"),
    // Technology & innovation
    ("ARKK", "ARKK - ARK Innovation ETF", "Disruptive Innovation Companies (High Volatility)"),
    ("SNAS.AX", "SNAS - Ultra Short NASDAQ 100", "Leveraged Inverse NASDAQ ETF (Very High Volatility)"),
    ("LNAS.AX", "LNAS - Ultra Long NASDAQ 100", "Leveraged Long NASDAQ ETF (Very High Volatility)"),
    // Emerging markets
    ("VEE.AX", "VEE - Vanguard Emerging Markets", "Emerging Markets Shares Index ETF (High Volatility)"),
    ("IEM.AX", "IEM - iShares Emerging Markets", "MSCI Emerging Markets ETF (High Volatility)"),
    // Thematic
    ("RBTZ.AX", "RBTZ - BetaShares Global Robotics & AI", "Robotics and Artificial Intelligence ETF (High Volatility)"),
    ("HACK.AX", "HACK - BetaShares Global Cybersecurity", "Cybersecurity ETF (High Volatility)"),
    ("CLDD.AX", "CLDD - BetaShares Cloud Computing", "Cloud Computing ETF (High Volatility)"),
    // Commodities and materials
    ("MNRS.AX", "MNRS - BetaShares Global Gold Miners", "Gold Miners ETF (High Volatility)"),
    ("URNM", "URNM - Sprott Uranium Miners", "Uranium Mining Companies ETF (Very High Volatility)"),
    ("REMX", "REMX - VanEck Rare Earth/Strategic Metals", "Rare Earth & Strategic Metals ETF (High Volatility)"),
    // Leveraged
    ("GEAR.AX", "GEAR - BetaShares Geared Australian Equity", "Leveraged Australian Shares ETF (Very High Volatility)"),
    ("BBOZ.AX", "BBOZ - BetaShares Australian Strong Bear", "Leveraged Inverse Australian Shares ETF (Very High Volatility)"),
    // Individual volatile stocks
    ("ZIP.AX", "ZIP - Zip Co Limited", "Buy Now Pay Later Company (High Volatility)"),
    ("BRN.AX", "BRN - BrainChip Holdings", "AI Semiconductor Company (Very High Volatility)"),
    ("VUL.AX", "VUL - Vulcan Energy Resources", "Lithium Development Company (Very High Volatility)"),
    ("NVX.AX", "NVX - NOVONIX Limited", "Battery Technology Company (High Volatility)"),
];
